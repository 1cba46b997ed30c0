/// The per-frame simulation step.
///
/// [`tick`] advances one [`SimulationState`] by exactly one frame.  All
/// randomness comes through the injected `rng` and every notification is
/// appended to `events`, so callers fully control determinism and nothing
/// outside the state is touched.
use glam::Vec2;
use rand::Rng;
use tracing::info;

use crate::combat::resolve_collisions;
use crate::difficulty::{Difficulty, DifficultyConfig};
use crate::effects::{expire_weapon, update_particles, ParticleEmitter};
use crate::entities::{
    Bullet, GameState, GameStatus, GameSummary, Player, SimulationState, WaveManager, WeaponKind,
};
use crate::events::GameEvent;
use crate::geometry::{angle_to, distance, heading, Playfield};
use crate::input::{Aim, InputSample};
use crate::spawn::spawn_enemies;
use crate::tuning::{DeviceProfile, ParticleQuality};
use crate::wave::manage_waves;

/// Bullets are culled once this far outside the playfield.
pub const BULLET_MARGIN: f32 = 10.0;

/// Angle between neighbouring bullets of a spread shot, in radians.
pub const SPREAD_STEP: f32 = 0.3;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state for a new game: player centred, wave 1 active.
pub fn init_state(difficulty: Difficulty, profile: DeviceProfile, field: Playfield) -> SimulationState {
    let config = DifficultyConfig::new(difficulty, profile);
    let size = profile.player_size();

    SimulationState {
        player: Player {
            pos: field.center(),
            half: Vec2::splat(size / 2.0),
            speed: config.player_speed,
            angle: 0.0,
            shoot_cooldown: 0,
            weapon: profile.weapon(WeaponKind::Basic),
            effect: None,
            max_lives: config.player_lives,
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        power_ups: Vec::new(),
        particles: Vec::new(),
        game: GameState {
            score: 0,
            lives: config.player_lives,
            wave: 1,
            kills: 0,
            status: GameStatus::Playing,
            enemies_this_wave: config.enemies_per_wave,
            wave_complete: false,
        },
        waves: WaveManager::new(),
        difficulty,
        config,
        profile,
        quality: ParticleQuality::default(),
        field,
        frame: 0,
    }
}

impl SimulationState {
    pub fn emitter(&self) -> ParticleEmitter {
        ParticleEmitter::new(self.profile, self.quality)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.game.score,
            kills: self.game.kills,
            wave: self.game.wave,
            difficulty: self.difficulty,
        }
    }

    pub fn is_over(&self) -> bool {
        self.game.status == GameStatus::GameOver
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  Does nothing unless the game is
/// `Playing`.
pub fn tick(
    state: &mut SimulationState,
    input: &InputSample,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    if state.game.status != GameStatus::Playing {
        return;
    }
    state.frame += 1;

    // ── 1. Entity kinematics ─────────────────────────────────────────────────
    update_player(state, input, events);
    update_bullets(state);
    update_enemies(state);
    update_power_ups(state);
    update_particles(&mut state.particles);

    // ── 2. Combat, waves, spawning ───────────────────────────────────────────
    resolve_collisions(state, rng, events);
    manage_waves(state, rng, events);
    spawn_enemies(state, rng);

    // ── 3. Game over ─────────────────────────────────────────────────────────
    if state.game.lives == 0 {
        state.game.status = GameStatus::GameOver;
        let summary = state.summary();
        info!(
            score = summary.score,
            kills = summary.kills,
            wave = summary.wave,
            difficulty = summary.difficulty.name(),
            "game over"
        );
        events.push(GameEvent::GameOver(summary));
    }
}

fn update_player(state: &mut SimulationState, input: &InputSample, events: &mut Vec<GameEvent>) {
    let mut firing = input.fire;
    match input.aim {
        Aim::Keep => {}
        Aim::Angle(angle) => state.player.angle = angle,
        Aim::Point(target) => state.player.angle = angle_to(state.player.pos, target),
        Aim::NearestEnemy => {
            if firing {
                let from = state.player.pos;
                let nearest = state.enemies.iter().min_by(|a, b| {
                    distance(from, a.pos).total_cmp(&distance(from, b.pos))
                });
                match nearest {
                    Some(enemy) => state.player.angle = angle_to(from, enemy.pos),
                    None => firing = false,
                }
            }
        }
    }

    if firing && state.player.shoot_cooldown == 0 {
        fire(state);
        events.push(GameEvent::ShotFired {
            weapon: state.player.weapon.kind,
        });
    }

    let player = &mut state.player;
    let moved = player.pos + input.movement * player.speed;
    player.pos = state.field.clamp(moved, player.half);
    player.shoot_cooldown = player.shoot_cooldown.saturating_sub(1);

    if let Some(weapon) = expire_weapon(&mut state.player, state.profile, state.frame) {
        info!(?weapon, "weapon effect expired");
        events.push(GameEvent::WeaponExpired { weapon });
    }
}

/// Fire the equipped weapon along the player's facing angle.
fn fire(state: &mut SimulationState) {
    let player = &state.player;
    let weapon = player.weapon;
    let half = Vec2::splat(state.profile.bullet_size() / 2.0);
    let make = |angle: f32| Bullet {
        pos: player.pos,
        half,
        angle,
        speed: weapon.bullet_speed,
        damage: weapon.damage,
        color: weapon.color,
    };

    match weapon.kind {
        WeaponKind::Spread => {
            for i in -2..=2 {
                state
                    .bullets
                    .push(make(player.angle + i as f32 * SPREAD_STEP));
            }
        }
        _ => state.bullets.push(make(player.angle)),
    }
    state.player.shoot_cooldown = weapon.fire_rate;
}

fn update_bullets(state: &mut SimulationState) {
    let field = state.field;
    state.bullets.retain_mut(|b| {
        b.pos += heading(b.angle) * b.speed;
        field.contains_with_margin(b.pos, BULLET_MARGIN)
    });
}

/// Simple pursuit: every enemy heads straight for the player each tick.
fn update_enemies(state: &mut SimulationState) {
    let target = state.player.pos;
    for enemy in &mut state.enemies {
        let angle = angle_to(enemy.pos, target);
        enemy.pos += heading(angle) * enemy.speed;
    }
}

fn update_power_ups(state: &mut SimulationState) {
    state.power_ups.retain_mut(|p| {
        p.life = p.life.saturating_sub(1);
        p.life > 0
    });
}
