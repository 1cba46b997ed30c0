/// The abstract per-tick input sample.  Keyboards, pointers and touch
/// joysticks are all reduced to this before reaching the simulation.
use glam::Vec2;

/// Diagonal moves are scaled by this so they are not faster than straight ones.
const DIAGONAL_SCALE: f32 = 0.707;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Aim {
    /// Keep the current facing angle.
    #[default]
    Keep,
    /// Absolute angle in radians.
    Angle(f32),
    /// Face a point in playfield coordinates (mouse cursor).
    Point(Vec2),
    /// Face the closest live enemy; no shot is fired when there is none.
    NearestEnemy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    /// Components in `[-1, 1]`.
    pub movement: Vec2,
    pub fire: bool,
    pub aim: Aim,
}

impl InputSample {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Build a sample from digital direction axes (each -1, 0 or 1).
    pub fn from_axes(dx: i8, dy: i8, fire: bool, aim: Aim) -> Self {
        let mut movement = Vec2::new(dx.signum() as f32, dy.signum() as f32);
        if movement.x != 0.0 && movement.y != 0.0 {
            movement *= DIAGONAL_SCALE;
        }
        Self { movement, fire, aim }
    }
}
