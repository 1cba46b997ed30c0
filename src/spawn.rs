/// Spawn scheduler: decides when and where enemies enter the playfield.
///
/// At most one enemy is created per call.  Two paths lead to a spawn:
///
/// * the **scheduled** path rolls against the difficulty's spawn rate once the
///   spawn interval has elapsed, as long as the wave quota and the concurrent
///   cap both allow another enemy;
/// * the **forced** path (starvation guard) fires once the playfield has been
///   empty for [`FORCE_SPAWN_THRESHOLD`] ticks while the wave still needs
///   enemies, so unlucky rolls or desynchronised counters cannot stall a wave.
///   An empty field with more spawns than kills on record first has its spawn
///   count pulled back down to the kill count.
use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::entities::{Enemy, SimulationState};

/// Ticks with an empty field before an enemy is spawned unconditionally.
pub const FORCE_SPAWN_THRESHOLD: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    Nothing,
    Scheduled,
    Forced,
}

/// Spawn probability adjusted for wave progress: denser at both ends of a wave.
pub fn adjusted_spawn_chance(base: f64, spawned: u32, required: u32) -> f64 {
    if required == 0 {
        return base;
    }
    let progress = spawned as f64 / required as f64;
    if progress < 0.3 {
        base * 1.5
    } else if progress > 0.8 {
        base * 2.0
    } else {
        base
    }
}

/// Run the scheduler for the current tick.
pub fn spawn_enemies(state: &mut SimulationState, rng: &mut impl Rng) -> SpawnOutcome {
    if !state.waves.wave_active {
        return SpawnOutcome::Nothing;
    }

    let required = state.game.enemies_this_wave;

    // With the field empty every spawned enemy must have been killed; any
    // surplus is drift and would block both the guard and wave completion.
    if state.enemies.is_empty() && state.waves.enemies_spawned > state.waves.enemies_killed {
        debug!(
            spawned = state.waves.enemies_spawned,
            killed = state.waves.enemies_killed,
            "reconciling spawn counter with empty field"
        );
        state.waves.enemies_spawned = state.waves.enemies_killed;
    }

    let need_more = state.waves.enemies_spawned < required;
    let can_spawn_more = state.enemies.len() < state.config.max_enemies;

    // ── Starvation guard ─────────────────────────────────────────────────────
    if state.enemies.is_empty() && need_more {
        state.waves.force_spawn_timer += 1;
        if state.waves.force_spawn_timer > FORCE_SPAWN_THRESHOLD {
            spawn_enemy(state, rng);
            state.waves.enemies_spawned += 1;
            state.waves.last_spawn_frame = Some(state.frame);
            state.waves.force_spawn_timer = 0;
            debug!(
                spawned = state.waves.enemies_spawned,
                required, "forced enemy spawn"
            );
            return SpawnOutcome::Forced;
        }
    } else {
        state.waves.force_spawn_timer = 0;
    }

    // ── Scheduled spawn ──────────────────────────────────────────────────────
    let interval_elapsed = match state.waves.last_spawn_frame {
        None => true,
        Some(last) => state.frame.saturating_sub(last) > state.config.spawn_interval,
    };
    if !(need_more && can_spawn_more && interval_elapsed) {
        return SpawnOutcome::Nothing;
    }

    let chance = adjusted_spawn_chance(
        state.config.enemy_spawn_rate,
        state.waves.enemies_spawned,
        required,
    );
    if rng.gen::<f64>() >= chance {
        return SpawnOutcome::Nothing;
    }

    spawn_enemy(state, rng);
    state.waves.enemies_spawned += 1;
    state.waves.last_spawn_frame = Some(state.frame);
    debug!(
        spawned = state.waves.enemies_spawned,
        required,
        on_field = state.enemies.len(),
        "enemy spawned"
    );
    SpawnOutcome::Scheduled
}

/// Create one enemy just outside a random playfield edge.
///
/// Does not touch the wave counters; callers account for the spawn.
pub fn spawn_enemy(state: &mut SimulationState, rng: &mut impl Rng) {
    let archetypes = state.profile.enemy_archetypes();
    let Some(kind) = archetypes.choose(rng) else {
        return;
    };

    let w = state.field.width;
    let h = state.field.height;
    let size = kind.size;
    let pos = match rng.gen_range(0..4) {
        0 => Vec2::new(rng.gen::<f32>() * w, -size),
        1 => Vec2::new(w + size, rng.gen::<f32>() * h),
        2 => Vec2::new(rng.gen::<f32>() * w, h + size),
        _ => Vec2::new(-size, rng.gen::<f32>() * h),
    };

    let wave_bonus = state.game.wave.saturating_sub(1) as f32 * state.profile.wave_speed_step();
    let health = (kind.health as f32 * state.config.damage_multiplier).ceil() as i32;

    state.enemies.push(Enemy {
        pos,
        half: Vec2::splat(size / 2.0),
        speed: kind.speed * state.config.enemy_speed_multiplier + wave_bonus,
        glyph: kind.glyph,
        health,
        max_health: health,
        points: kind.points,
    });
}
