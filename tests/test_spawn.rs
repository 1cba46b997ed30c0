use wave_shooter::compute::init_state;
use wave_shooter::difficulty::Difficulty;
use wave_shooter::entities::*;
use wave_shooter::geometry::Playfield;
use wave_shooter::spawn::*;
use wave_shooter::tuning::DeviceProfile;

use glam::Vec2;
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state(difficulty: Difficulty) -> SimulationState {
    init_state(difficulty, DeviceProfile::Desktop, Playfield::new(960.0, 540.0))
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Every roll comes out as zero, so any non-zero chance succeeds.
fn always_roll() -> StepRng {
    StepRng::new(0, 0)
}

fn parked_enemy() -> Enemy {
    Enemy {
        pos: Vec2::new(10.0, 10.0),
        half: Vec2::splat(12.5),
        speed: 0.0,
        glyph: "👾",
        health: 1,
        max_health: 1,
        points: 10,
    }
}

// ── starvation guard ──────────────────────────────────────────────────────────

#[test]
fn starvation_guard_fires_on_sixty_first_call() {
    let mut s = make_state(Difficulty::Easy);
    s.config.enemy_spawn_rate = 0.0;
    let mut rng = seeded_rng();

    for call in 1..=60 {
        assert_eq!(spawn_enemies(&mut s, &mut rng), SpawnOutcome::Nothing, "call {call}");
    }
    assert_eq!(s.waves.force_spawn_timer, 60);
    assert!(s.enemies.is_empty());

    assert_eq!(spawn_enemies(&mut s, &mut rng), SpawnOutcome::Forced);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.waves.enemies_spawned, 1);
    assert_eq!(s.waves.force_spawn_timer, 0);
    assert_eq!(s.waves.last_spawn_frame, Some(s.frame));
}

#[test]
fn starvation_timer_resets_when_field_occupied() {
    let mut s = make_state(Difficulty::Easy);
    s.config.enemy_spawn_rate = 0.0;
    s.waves.force_spawn_timer = 45;
    s.enemies.push(parked_enemy());
    spawn_enemies(&mut s, &mut seeded_rng());
    assert_eq!(s.waves.force_spawn_timer, 0);
}

#[test]
fn starvation_guard_idle_when_quota_met() {
    let mut s = make_state(Difficulty::Easy);
    s.waves.enemies_spawned = 8;
    s.waves.enemies_killed = 8;
    let mut rng = seeded_rng();
    for _ in 0..200 {
        assert_eq!(spawn_enemies(&mut s, &mut rng), SpawnOutcome::Nothing);
    }
    assert!(s.enemies.is_empty());
    assert_eq!(s.waves.force_spawn_timer, 0);
}

#[test]
fn drifted_counters_recover_on_empty_field() {
    let mut s = make_state(Difficulty::Easy);
    s.config.enemy_spawn_rate = 0.0;
    s.waves.enemies_spawned = 8;
    s.waves.enemies_killed = 5;
    s.enemies.clear();
    let mut rng = seeded_rng();

    let mut forced_on = None;
    for call in 1..=FORCE_SPAWN_THRESHOLD + 1 {
        if spawn_enemies(&mut s, &mut rng) == SpawnOutcome::Forced {
            forced_on = Some(call);
            break;
        }
    }

    assert_eq!(forced_on, Some(FORCE_SPAWN_THRESHOLD + 1));
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.waves.enemies_spawned, 6);
    assert_eq!(s.waves.enemies_killed, 5);
}

#[test]
fn drifted_wave_still_completes() {
    let mut s = make_state(Difficulty::Easy);
    s.config.enemy_spawn_rate = 0.0;
    s.waves.enemies_spawned = 8;
    s.waves.enemies_killed = 5;
    s.enemies.clear();
    let mut rng = seeded_rng();

    // Stand in for the player: every enemy that appears is shot down.
    for _ in 0..1_000 {
        s.frame += 1;
        spawn_enemies(&mut s, &mut rng);
        let shot_down = s.enemies.drain(..).count();
        for _ in 0..shot_down {
            s.waves.record_kill();
        }
        if s.waves.is_cleared(s.game.enemies_this_wave, s.enemies.len()) {
            break;
        }
    }

    assert!(s.waves.is_cleared(8, 0));
    assert_eq!(s.waves.enemies_spawned, 8);
    assert_eq!(s.waves.enemies_killed, 8);
}

// ── scheduled spawns ──────────────────────────────────────────────────────────

#[test]
fn first_spawn_needs_no_interval() {
    let mut s = make_state(Difficulty::Easy);
    assert_eq!(spawn_enemies(&mut s, &mut always_roll()), SpawnOutcome::Scheduled);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.waves.enemies_spawned, 1);
    assert_eq!(s.waves.last_spawn_frame, Some(0));
}

#[test]
fn interval_must_be_strictly_exceeded() {
    let mut s = make_state(Difficulty::Easy); // spawn_interval 90
    let mut rng = always_roll();
    spawn_enemies(&mut s, &mut rng);

    s.frame = 90;
    assert_eq!(spawn_enemies(&mut s, &mut rng), SpawnOutcome::Nothing);
    s.frame = 91;
    assert_eq!(spawn_enemies(&mut s, &mut rng), SpawnOutcome::Scheduled);
    assert_eq!(s.waves.enemies_spawned, 2);
}

#[test]
fn failed_roll_spawns_nothing() {
    let mut s = make_state(Difficulty::Easy);
    s.config.enemy_spawn_rate = 0.0;
    assert_eq!(spawn_enemies(&mut s, &mut always_roll()), SpawnOutcome::Nothing);
    assert_eq!(s.waves.last_spawn_frame, None);
}

#[test]
fn at_most_one_enemy_per_call() {
    let mut s = make_state(Difficulty::Extreme);
    s.config.spawn_interval = 0;
    let mut rng = always_roll();
    for _ in 0..10 {
        let before = s.enemies.len();
        s.frame += 1;
        spawn_enemies(&mut s, &mut rng);
        assert!(s.enemies.len() <= before + 1);
    }
}

#[test]
fn cap_limits_concurrent_enemies() {
    let mut s = make_state(Difficulty::Easy); // max 5, quota 8
    let mut rng = always_roll();
    for _ in 0..50 {
        s.frame += 100;
        spawn_enemies(&mut s, &mut rng);
    }
    assert_eq!(s.enemies.len(), 5);
    assert_eq!(s.waves.enemies_spawned, 5);
}

#[test]
fn quota_limits_total_spawns() {
    let mut s = make_state(Difficulty::Easy);
    s.config.max_enemies = 100;
    let mut rng = always_roll();
    for _ in 0..50 {
        s.frame += 100;
        spawn_enemies(&mut s, &mut rng);
    }
    assert_eq!(s.waves.enemies_spawned, 8);
    assert_eq!(s.enemies.len(), 8);
}

#[test]
fn frozen_while_wave_inactive() {
    let mut s = make_state(Difficulty::Easy);
    s.waves.wave_active = false;
    let mut rng = always_roll();
    for _ in 0..100 {
        s.frame += 100;
        assert_eq!(spawn_enemies(&mut s, &mut rng), SpawnOutcome::Nothing);
    }
    assert!(s.enemies.is_empty());
    assert_eq!(s.waves.force_spawn_timer, 0);
}

// ── adjusted_spawn_chance ─────────────────────────────────────────────────────

#[test]
fn chance_tracks_wave_progress() {
    assert_eq!(adjusted_spawn_chance(0.12, 2, 12), 0.12 * 1.5);
    assert_eq!(adjusted_spawn_chance(0.12, 6, 12), 0.12);
    assert_eq!(adjusted_spawn_chance(0.12, 11, 12), 0.24);
}

// ── spawn_enemy ───────────────────────────────────────────────────────────────

#[test]
fn spawned_enemy_starts_off_field() {
    let mut s = make_state(Difficulty::Normal);
    let mut rng = seeded_rng();
    for _ in 0..40 {
        spawn_enemy(&mut s, &mut rng);
    }
    for e in &s.enemies {
        let p = e.pos;
        assert!(p.x < 0.0 || p.x > 960.0 || p.y < 0.0 || p.y > 540.0, "{p:?}");
    }
    // counters are the caller's job
    assert_eq!(s.waves.enemies_spawned, 0);
}

#[test]
fn enemy_health_scaled_by_damage_multiplier() {
    let mut s = make_state(Difficulty::Hard); // × 1.5
    let mut rng = seeded_rng();
    for _ in 0..40 {
        spawn_enemy(&mut s, &mut rng);
    }
    for e in &s.enemies {
        let expected = if e.glyph == "🤖" { 3 } else { 2 };
        assert_eq!(e.health, expected);
        assert_eq!(e.max_health, expected);
    }
}

#[test]
fn easy_health_rounds_up() {
    let mut s = make_state(Difficulty::Easy); // × 0.8
    let mut rng = seeded_rng();
    for _ in 0..40 {
        spawn_enemy(&mut s, &mut rng);
    }
    for e in &s.enemies {
        let expected = if e.glyph == "🤖" { 2 } else { 1 };
        assert_eq!(e.health, expected);
    }
}

#[test]
fn later_waves_spawn_faster_enemies() {
    let mut s = make_state(Difficulty::Normal);
    s.game.wave = 3;
    let archetypes = DeviceProfile::Desktop.enemy_archetypes();
    let mut rng = seeded_rng();
    spawn_enemy(&mut s, &mut rng);

    let e = &s.enemies[0];
    let base = archetypes
        .iter()
        .find(|a| a.glyph == e.glyph)
        .map(|a| a.speed)
        .unwrap();
    assert!((e.speed - (base + 0.2)).abs() < 1e-5);
}
