/// Collision & combat resolution.
///
/// Runs once per frame in a fixed order, each pass seeing the results of the
/// previous one:
///
/// 1. bullets × enemies: damage, kills, drops
/// 2. player × enemies: contact damage, enemy vanishes without kill credit
/// 3. player × power-ups: pickups
///
/// Removals are only marked during a scan and applied once the scan is over,
/// so no entry is skipped or visited twice.
use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::effects::equip_timed;
use crate::entities::{PowerUp, PowerUpKind, Rgb, SimulationState, WeaponKind};
use crate::events::GameEvent;
use crate::tuning::{Burst, DeviceProfile};

/// Score granted by a bonus-score pickup.
pub const BONUS_SCORE: u32 = 100;

pub fn resolve_collisions(
    state: &mut SimulationState,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    bullets_vs_enemies(state, rng, events);
    player_vs_enemies(state, rng, events);
    player_vs_power_ups(state, rng, events);
}

/// Bullets are scanned in store order and each one hits at most the first
/// live enemy it overlaps.  An enemy killed earlier in the scan is skipped.
fn bullets_vs_enemies(
    state: &mut SimulationState,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let emitter = state.emitter();
    let mut spent = vec![false; state.bullets.len()];
    let mut dead = vec![false; state.enemies.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let bbox = bullet.aabb();
        let Some(ei) = state
            .enemies
            .iter()
            .zip(&dead)
            .position(|(e, &gone)| !gone && e.aabb().overlaps(&bbox))
        else {
            continue;
        };

        spent[bi] = true;
        let enemy = &mut state.enemies[ei];
        enemy.health -= bullet.damage;

        if enemy.is_dead() {
            dead[ei] = true;
            state.game.score += enemy.points;
            state.game.kills += 1;
            state.waves.record_kill();
            emitter.emit(&mut state.particles, enemy.pos, Rgb::SALMON, Burst::EnemyDeath, rng);
            events.push(GameEvent::EnemyKilled {
                points: enemy.points,
            });

            if rng.gen::<f64>() < state.config.power_up_rate {
                drop_power_up(&mut state.power_ups, state.profile, enemy.pos, rng);
            }
        } else {
            emitter.emit(&mut state.particles, enemy.pos, Rgb::ORANGE, Burst::EnemyHit, rng);
            events.push(GameEvent::EnemyHit {
                health_left: enemy.health,
            });
        }
    }

    retain_unmarked(&mut state.bullets, &spent);
    retain_unmarked(&mut state.enemies, &dead);
}

/// Every enemy touching the player costs a life and disappears.  It is not a
/// kill: no score, no kill credit, and its spawn goes back to the wave quota.
fn player_vs_enemies(
    state: &mut SimulationState,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let emitter = state.emitter();
    let player_box = state.player.aabb();
    let mut touched = vec![false; state.enemies.len()];

    for (ei, enemy) in state.enemies.iter().enumerate() {
        if !enemy.aabb().overlaps(&player_box) {
            continue;
        }
        touched[ei] = true;
        state.game.lives = state.game.lives.saturating_sub(1);
        state.waves.refund_spawn();
        emitter.emit(&mut state.particles, state.player.pos, Rgb::RED, Burst::PlayerHurt, rng);
        events.push(GameEvent::PlayerHurt {
            lives_left: state.game.lives,
        });
    }

    retain_unmarked(&mut state.enemies, &touched);
}

fn player_vs_power_ups(
    state: &mut SimulationState,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let emitter = state.emitter();
    let player_box = state.player.aabb();
    let collected: Vec<(usize, PowerUpKind, Vec2)> = state
        .power_ups
        .iter()
        .enumerate()
        .filter(|(_, p)| p.aabb().overlaps(&player_box))
        .map(|(i, p)| (i, p.kind, p.pos))
        .collect();

    let mut taken = vec![false; state.power_ups.len()];
    for (i, kind, pos) in collected {
        taken[i] = true;
        apply_power_up(state, kind);
        emitter.emit(&mut state.particles, pos, Rgb::GREEN, Burst::Pickup, rng);
        events.push(GameEvent::PowerUpCollected { kind });
    }

    retain_unmarked(&mut state.power_ups, &taken);
}

/// Apply a pickup's effect to the player and score.
pub fn apply_power_up(state: &mut SimulationState, kind: PowerUpKind) {
    let weapon = match kind {
        PowerUpKind::Life => {
            if state.game.lives < state.player.max_lives {
                state.game.lives += 1;
            }
            return;
        }
        PowerUpKind::BonusScore => {
            state.game.score += BONUS_SCORE;
            return;
        }
        PowerUpKind::RapidWeapon => WeaponKind::Rapid,
        PowerUpKind::HeavyWeapon => WeaponKind::Heavy,
        PowerUpKind::SpreadWeapon => WeaponKind::Spread,
    };
    equip_timed(&mut state.player, state.profile, weapon, state.frame);
}

/// Leave a random power-up where an enemy died.
pub fn drop_power_up(
    power_ups: &mut Vec<PowerUp>,
    profile: DeviceProfile,
    at: Vec2,
    rng: &mut impl Rng,
) {
    let Some(&kind) = PowerUpKind::ALL.choose(rng) else {
        return;
    };
    power_ups.push(PowerUp {
        pos: at,
        half: Vec2::splat(profile.power_up_size() / 2.0),
        kind,
        life: profile.power_up_life(),
    });
}

fn retain_unmarked<T>(items: &mut Vec<T>, marked: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !marked[idx];
        idx += 1;
        keep
    });
}
