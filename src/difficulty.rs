/// Difficulty levels and their tuning tables.
use tracing::warn;

use crate::tuning::DeviceProfile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    /// Resolve a user-supplied name.  Unknown names fall back to `Normal`.
    pub fn from_name(name: &str) -> Difficulty {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "normal" => Difficulty::Normal,
            "hard" => Difficulty::Hard,
            "extreme" => Difficulty::Extreme,
            other => {
                warn!(requested = other, "unknown difficulty, falling back to normal");
                Difficulty::Normal
            }
        }
    }
}

/// Immutable tuning bundle, selected once at game start.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyConfig {
    pub name: &'static str,
    pub player_speed: f32,
    pub enemy_speed_multiplier: f32,
    /// Base probability of a spawn per eligible check.
    pub enemy_spawn_rate: f64,
    pub max_enemies: usize,
    pub enemies_per_wave: u32,
    pub power_up_rate: f64,
    pub player_lives: u32,
    /// Multiplies archetype health.
    pub damage_multiplier: f32,
    /// Minimum ticks between scheduled spawns.
    pub spawn_interval: u64,
}

impl DifficultyConfig {
    pub fn new(difficulty: Difficulty, profile: DeviceProfile) -> Self {
        // Only player speed and the enemy cap vary by device.
        let (desktop, tablet, phone) = player_speed(difficulty);
        let speed = match profile {
            DeviceProfile::Desktop => desktop,
            DeviceProfile::Tablet => tablet,
            DeviceProfile::Phone => phone,
        };
        let (desktop, tablet, phone) = max_enemies(difficulty);
        let cap = match profile {
            DeviceProfile::Desktop => desktop,
            DeviceProfile::Tablet => tablet,
            DeviceProfile::Phone => phone,
        };

        let base = match difficulty {
            Difficulty::Easy => (0.7, 0.08, 8, 0.25, 5, 0.8, 90),
            Difficulty::Normal => (1.0, 0.12, 12, 0.15, 3, 1.0, 75),
            Difficulty::Hard => (1.3, 0.15, 18, 0.10, 2, 1.5, 60),
            Difficulty::Extreme => (1.8, 0.20, 25, 0.08, 1, 2.0, 45),
        };
        let (speed_mult, spawn_rate, per_wave, power_up_rate, lives, damage_mult, interval) = base;

        DifficultyConfig {
            name: difficulty.name(),
            player_speed: speed,
            enemy_speed_multiplier: speed_mult,
            enemy_spawn_rate: spawn_rate,
            max_enemies: cap,
            enemies_per_wave: per_wave,
            power_up_rate,
            player_lives: lives,
            damage_multiplier: damage_mult,
            spawn_interval: interval,
        }
    }
}

// ── Device-dependent columns (desktop, tablet, phone) ────────────────────────

fn player_speed(difficulty: Difficulty) -> (f32, f32, f32) {
    match difficulty {
        Difficulty::Easy => (3.5, 3.2, 3.0),
        Difficulty::Normal => (3.0, 2.8, 2.5),
        Difficulty::Hard => (2.8, 2.5, 2.2),
        Difficulty::Extreme => (2.5, 2.3, 2.0),
    }
}

fn max_enemies(difficulty: Difficulty) -> (usize, usize, usize) {
    match difficulty {
        Difficulty::Easy => (5, 4, 3),
        Difficulty::Normal => (6, 5, 4),
        Difficulty::Hard => (8, 6, 5),
        Difficulty::Extreme => (10, 8, 6),
    }
}
