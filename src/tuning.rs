/// Device-profile tuning data.
///
/// The game is played on desktops, tablets and phones with different entity
/// sizes, speeds and effect durations.  All of those differences live here as
/// data; the simulation code never branches on the device itself.
use serde::Deserialize;

use crate::entities::{Rgb, Weapon, WeaponKind};

/// Simulation ticks per second of game time.  Every tick-denominated timer
/// in this module assumes this rate.
pub const TICKS_PER_SECOND: u64 = 60;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceProfile {
    #[default]
    Desktop,
    Tablet,
    Phone,
}

/// Scales every particle burst.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleQuality {
    Low,
    #[default]
    Medium,
    High,
}

impl ParticleQuality {
    pub fn scale(self, count: u32) -> u32 {
        match self {
            ParticleQuality::Low => count.div_ceil(2),
            ParticleQuality::Medium => count,
            ParticleQuality::High => (count * 3).div_ceil(2),
        }
    }
}

/// Enemy template picked uniformly at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyArchetype {
    pub glyph: &'static str,
    pub speed: f32,
    pub points: u32,
    pub health: u32,
    /// Full edge length of the bounding box.
    pub size: f32,
}

/// Particle burst flavours, one per combat event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Burst {
    EnemyDeath,
    EnemyHit,
    PlayerHurt,
    Pickup,
}

impl DeviceProfile {
    pub fn is_touch(self) -> bool {
        !matches!(self, DeviceProfile::Desktop)
    }

    fn pick<T>(self, desktop: T, tablet: T, phone: T) -> T {
        match self {
            DeviceProfile::Desktop => desktop,
            DeviceProfile::Tablet => tablet,
            DeviceProfile::Phone => phone,
        }
    }

    fn touch_or<T>(self, touch: T, desktop: T) -> T {
        if self.is_touch() {
            touch
        } else {
            desktop
        }
    }

    // ── Sizes ─────────────────────────────────────────────────────────────────

    pub fn player_size(self) -> f32 {
        self.pick(30.0, 35.0, 25.0)
    }

    pub fn enemy_size(self) -> f32 {
        self.pick(25.0, 28.0, 22.0)
    }

    pub fn bullet_size(self) -> f32 {
        self.pick(6.0, 6.0, 5.0)
    }

    pub fn power_up_size(self) -> f32 {
        self.touch_or(20.0, 25.0)
    }

    // ── Weapons ───────────────────────────────────────────────────────────────

    pub fn weapon(self, kind: WeaponKind) -> Weapon {
        match kind {
            WeaponKind::Basic => Weapon {
                name: "Basic Gun",
                damage: 1,
                fire_rate: self.pick(8, 7, 6),
                bullet_speed: self.pick(8.0, 7.0, 6.0),
                color: Rgb::GOLD,
                kind,
            },
            WeaponKind::Rapid => Weapon {
                name: "Rapid Fire",
                damage: 1,
                fire_rate: 3,
                bullet_speed: self.pick(10.0, 9.0, 8.0),
                color: Rgb::CYAN,
                kind,
            },
            WeaponKind::Heavy => Weapon {
                name: "Heavy Gun",
                damage: 3,
                fire_rate: self.pick(12, 11, 10),
                bullet_speed: self.pick(6.0, 6.0, 5.0),
                color: Rgb::ORANGE_RED,
                kind,
            },
            WeaponKind::Spread => Weapon {
                name: "Spread Shot",
                damage: 2,
                fire_rate: self.pick(15, 14, 12),
                bullet_speed: self.pick(7.0, 7.0, 6.0),
                color: Rgb::HOT_PINK,
                kind,
            },
        }
    }

    /// How long a weapon power-up lasts, in ticks.
    pub fn weapon_duration(self, kind: WeaponKind) -> u64 {
        let seconds = match kind {
            WeaponKind::Basic => 0,
            WeaponKind::Rapid => self.touch_or(8, 10),
            WeaponKind::Heavy => self.touch_or(6, 8),
            WeaponKind::Spread => self.touch_or(10, 12),
        };
        seconds * TICKS_PER_SECOND
    }

    // ── Enemies ───────────────────────────────────────────────────────────────

    pub fn enemy_archetypes(self) -> [EnemyArchetype; 5] {
        let size = self.enemy_size();
        [
            EnemyArchetype { glyph: "👾", speed: self.pick(1.0, 0.9, 0.8), points: 10, health: 1, size },
            EnemyArchetype { glyph: "🤖", speed: self.pick(0.8, 0.7, 0.6), points: 20, health: 2, size: size + 2.0 },
            EnemyArchetype { glyph: "👹", speed: self.pick(1.2, 1.1, 1.0), points: 15, health: 1, size: size + 1.0 },
            EnemyArchetype { glyph: "🐶", speed: self.pick(1.8, 1.5, 1.3), points: 30, health: 1, size: size - 2.0 },
            EnemyArchetype { glyph: "😈", speed: self.pick(1.5, 1.3, 1.1), points: 25, health: 1, size: size - 1.0 },
        ]
    }

    /// Extra enemy speed gained per completed wave.
    pub fn wave_speed_step(self) -> f32 {
        self.touch_or(0.08, 0.1)
    }

    // ── Timers ────────────────────────────────────────────────────────────────

    /// Pause between a completed wave and the next one, in ticks.
    pub fn next_wave_delay(self) -> u32 {
        self.touch_or(120, 150)
    }

    pub fn power_up_life(self) -> u32 {
        self.touch_or(500, 600)
    }

    // ── Particles ─────────────────────────────────────────────────────────────

    pub fn burst_count(self, burst: Burst) -> u32 {
        match burst {
            Burst::EnemyDeath => self.touch_or(6, 8),
            Burst::EnemyHit => self.touch_or(4, 6),
            Burst::PlayerHurt => self.touch_or(10, 15),
            Burst::Pickup => self.touch_or(6, 10),
        }
    }

    /// Full range of the initial particle velocity on each axis.
    pub fn particle_spread(self) -> f32 {
        self.touch_or(6.0, 8.0)
    }

    pub fn particle_life(self) -> u32 {
        self.touch_or(25, 30)
    }

    /// `(min, range)` of the random particle size.
    pub fn particle_size(self) -> (f32, f32) {
        self.touch_or((1.0, 3.0), (2.0, 4.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_profiles_share_timers() {
        assert_eq!(DeviceProfile::Tablet.next_wave_delay(), 120);
        assert_eq!(DeviceProfile::Phone.next_wave_delay(), 120);
        assert_eq!(DeviceProfile::Desktop.next_wave_delay(), 150);
    }

    #[test]
    fn basic_weapon_never_expires() {
        assert_eq!(DeviceProfile::Desktop.weapon_duration(WeaponKind::Basic), 0);
        assert_eq!(
            DeviceProfile::Desktop.weapon_duration(WeaponKind::Rapid),
            10 * TICKS_PER_SECOND
        );
    }

    #[test]
    fn odd_bursts_round_up() {
        assert_eq!(ParticleQuality::Low.scale(15), 8);
        assert_eq!(ParticleQuality::High.scale(15), 23);
        assert_eq!(ParticleQuality::Low.scale(1), 1);
        assert_eq!(ParticleQuality::Low.scale(0), 0);
    }
}
