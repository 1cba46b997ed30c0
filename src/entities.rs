/// All game entity types: pure data, no logic beyond bounding-box accessors.
use glam::Vec2;

use crate::difficulty::{Difficulty, DifficultyConfig};
use crate::geometry::{Aabb, Playfield};
use crate::tuning::{DeviceProfile, ParticleQuality};

/// A cosmetic colour carried by bullets and particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const GOLD: Rgb = Rgb(0xFF, 0xD7, 0x00);
    pub const CYAN: Rgb = Rgb(0x00, 0xFF, 0xFF);
    pub const ORANGE_RED: Rgb = Rgb(0xFF, 0x45, 0x00);
    pub const HOT_PINK: Rgb = Rgb(0xFF, 0x69, 0xB4);
    /// Enemy death burst.
    pub const SALMON: Rgb = Rgb(0xFF, 0x6B, 0x6B);
    /// Enemy hit burst.
    pub const ORANGE: Rgb = Rgb(0xFF, 0xA5, 0x00);
    /// Player hurt burst.
    pub const RED: Rgb = Rgb(0xFF, 0x00, 0x00);
    /// Power-up pickup burst.
    pub const GREEN: Rgb = Rgb(0x00, 0xFF, 0x00);
}

// ── Weapons ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    Basic,
    Rapid,
    Heavy,
    /// Fires a five-bullet fan.
    Spread,
}

/// Immutable weapon descriptor.  Equipping copies it by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weapon {
    pub name: &'static str,
    pub damage: i32,
    /// Cooldown in ticks between shots.
    pub fire_rate: u32,
    pub bullet_speed: f32,
    pub color: Rgb,
    pub kind: WeaponKind,
}

/// The single timed-effect slot: a temporary weapon and the tick it ends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveEffect {
    pub weapon: WeaponKind,
    pub expires_at: u64,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub half: Vec2,
    pub speed: f32,
    /// Facing angle in radians.
    pub angle: f32,
    pub shoot_cooldown: u32,
    pub weapon: Weapon,
    pub effect: Option<ActiveEffect>,
    pub max_lives: u32,
}

impl Player {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub pos: Vec2,
    pub half: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub damage: i32,
    pub color: Rgb,
}

impl Bullet {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Vec2,
    pub half: Vec2,
    pub speed: f32,
    /// Cosmetic only.
    pub glyph: &'static str,
    pub health: i32,
    pub max_health: i32,
    pub points: u32,
}

impl Enemy {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Restores one life, up to the player's maximum.
    Life,
    RapidWeapon,
    HeavyWeapon,
    SpreadWeapon,
    /// Flat score bonus.
    BonusScore,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Life,
        PowerUpKind::RapidWeapon,
        PowerUpKind::HeavyWeapon,
        PowerUpKind::SpreadWeapon,
        PowerUpKind::BonusScore,
    ];
}

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub pos: Vec2,
    pub half: Vec2,
    pub kind: PowerUpKind,
    /// Remaining lifetime in ticks.
    pub life: u32,
}

impl PowerUp {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half)
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub color: Rgb,
    pub size: f32,
}

// ── Game & wave bookkeeping ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub score: u32,
    pub lives: u32,
    pub wave: u32,
    /// Total damage kills across all waves.
    pub kills: u32,
    pub status: GameStatus,
    pub enemies_this_wave: u32,
    /// Set between a wave's completion and the start of the next one.
    pub wave_complete: bool,
}

/// Persistent state of the spawn scheduler and wave state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveManager {
    pub enemies_spawned: u32,
    pub enemies_killed: u32,
    /// `None` until the first spawn of the game.
    pub last_spawn_frame: Option<u64>,
    pub wave_active: bool,
    /// Ticks left before the next wave starts.
    pub next_wave_delay: u32,
    /// Ticks spent with an empty playfield while the wave still needs enemies.
    pub force_spawn_timer: u32,
}

/// Produced once when the game ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub kills: u32,
    pub wave: u32,
    pub difficulty: Difficulty,
}

// ── Master simulation state ───────────────────────────────────────────────────

/// Everything one game instance needs.  Components receive it explicitly;
/// nothing in the crate is global, so several games can run side by side.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub game: GameState,
    pub waves: WaveManager,
    pub difficulty: Difficulty,
    pub config: DifficultyConfig,
    pub profile: DeviceProfile,
    pub quality: ParticleQuality,
    pub field: Playfield,
    /// Ticks simulated so far.
    pub frame: u64,
}
