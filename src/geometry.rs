/// Angle, distance and overlap helpers shared by every entity.
use glam::Vec2;

/// Angle in radians of the ray from `from` towards `to`.
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector pointing along `angle`.
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Axis-aligned box described by its centre and half-extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Strict overlap: boxes that merely touch along an edge do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }
}

/// The rectangular play area, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a centre point so a box with `half` extents stays inside.
    pub fn clamp(&self, pos: Vec2, half: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(half.x, (self.width - half.x).max(half.x)),
            pos.y.clamp(half.y, (self.height - half.y).max(half.y)),
        )
    }

    /// True while `pos` is within the field grown by `margin` on every side.
    pub fn contains_with_margin(&self, pos: Vec2, margin: f32) -> bool {
        pos.x > -margin
            && pos.x < self.width + margin
            && pos.y > -margin
            && pos.y < self.height + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_points_right_and_down() {
        assert_eq!(angle_to(Vec2::ZERO, Vec2::new(5.0, 0.0)), 0.0);
        let down = angle_to(Vec2::ZERO, Vec2::new(0.0, 3.0));
        assert!((down - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::splat(5.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(5.0));
        assert!(!a.overlaps(&b));
        let c = Aabb::new(Vec2::new(9.9, 0.0), Vec2::splat(5.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn clamp_keeps_box_inside() {
        let field = Playfield::new(100.0, 50.0);
        let p = field.clamp(Vec2::new(-20.0, 80.0), Vec2::splat(10.0));
        assert_eq!(p, Vec2::new(10.0, 40.0));
    }
}
