/// Cosmetic particle bursts and the timed weapon-effect slot.
use glam::Vec2;
use rand::Rng;

use crate::entities::{ActiveEffect, Particle, Player, Rgb, WeaponKind};
use crate::tuning::{Burst, DeviceProfile, ParticleQuality};

/// Velocity kept by a particle from one tick to the next.
pub const PARTICLE_DRAG: f32 = 0.96;

// ── Particles ─────────────────────────────────────────────────────────────────

/// Spawns particle bursts sized for a device profile and quality setting.
#[derive(Clone, Copy, Debug)]
pub struct ParticleEmitter {
    pub profile: DeviceProfile,
    pub quality: ParticleQuality,
}

impl ParticleEmitter {
    pub fn new(profile: DeviceProfile, quality: ParticleQuality) -> Self {
        Self { profile, quality }
    }

    /// Number of particles a burst produces after quality scaling.
    pub fn count(&self, burst: Burst) -> u32 {
        self.quality.scale(self.profile.burst_count(burst))
    }

    pub fn emit(
        &self,
        particles: &mut Vec<Particle>,
        at: Vec2,
        color: Rgb,
        burst: Burst,
        rng: &mut impl Rng,
    ) {
        let spread = self.profile.particle_spread();
        let life = self.profile.particle_life();
        let (min_size, size_range) = self.profile.particle_size();

        for _ in 0..self.count(burst) {
            let vel = Vec2::new(
                (rng.gen::<f32>() - 0.5) * spread,
                (rng.gen::<f32>() - 0.5) * spread,
            );
            particles.push(Particle {
                pos: at,
                vel,
                life,
                max_life: life,
                color,
                size: rng.gen::<f32>() * size_range + min_size,
            });
        }
    }
}

/// Integrate, apply drag and drop particles whose life ran out.
pub fn update_particles(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| {
        p.pos += p.vel;
        p.vel *= PARTICLE_DRAG;
        p.life = p.life.saturating_sub(1);
        p.life > 0
    });
}

// ── Timed weapon effect ───────────────────────────────────────────────────────

/// Equip a temporary weapon, replacing whatever effect was active.
pub fn equip_timed(player: &mut Player, profile: DeviceProfile, kind: WeaponKind, now: u64) {
    player.weapon = profile.weapon(kind);
    player.effect = match kind {
        WeaponKind::Basic => None,
        _ => Some(ActiveEffect {
            weapon: kind,
            expires_at: now + profile.weapon_duration(kind),
        }),
    };
}

/// Revert to the basic gun once the active effect has expired.
///
/// Returns the weapon that just ran out, at most once per effect.
pub fn expire_weapon(player: &mut Player, profile: DeviceProfile, now: u64) -> Option<WeaponKind> {
    let effect = player.effect?;
    if now < effect.expires_at {
        return None;
    }
    player.effect = None;
    player.weapon = profile.weapon(WeaponKind::Basic);
    Some(effect.weapon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn quality_scales_burst() {
        let low = ParticleEmitter::new(DeviceProfile::Desktop, ParticleQuality::Low);
        let high = ParticleEmitter::new(DeviceProfile::Desktop, ParticleQuality::High);
        assert_eq!(low.count(Burst::EnemyDeath), 4);
        assert_eq!(high.count(Burst::EnemyDeath), 12);
    }

    #[test]
    fn particles_decay_and_expire() {
        let emitter = ParticleEmitter::new(DeviceProfile::Desktop, ParticleQuality::Medium);
        let mut particles = Vec::new();
        let mut rng = StdRng::seed_from_u64(7);
        emitter.emit(&mut particles, Vec2::ZERO, Rgb::RED, Burst::EnemyHit, &mut rng);
        assert_eq!(particles.len(), 6);

        let v0 = particles[0].vel;
        update_particles(&mut particles);
        assert!((particles[0].vel - v0 * PARTICLE_DRAG).length() < 1e-6);

        for _ in 0..29 {
            update_particles(&mut particles);
        }
        assert!(particles.is_empty());
    }
}
