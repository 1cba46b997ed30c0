use wave_shooter::difficulty::*;
use wave_shooter::entities::*;
use wave_shooter::geometry::Aabb;
use wave_shooter::tuning::*;

use glam::Vec2;

#[test]
fn entity_enums_compare() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::Paused);
    assert_ne!(GameStatus::Paused, GameStatus::GameOver);
    assert_ne!(WeaponKind::Basic, WeaponKind::Spread);
    assert_eq!(PowerUpKind::ALL.len(), 5);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        score: 10,
        lives: 3,
        wave: 1,
        kills: 1,
        status: GameStatus::Playing,
        enemies_this_wave: 12,
        wave_complete: false,
    };
    let mut cloned = original.clone();
    cloned.score = 999;
    cloned.status = GameStatus::GameOver;
    assert_eq!(original.score, 10);
    assert_eq!(original.status, GameStatus::Playing);
}

#[test]
fn enemy_dies_at_zero_health() {
    let mut e = Enemy {
        pos: Vec2::ZERO,
        half: Vec2::splat(12.5),
        speed: 1.0,
        glyph: "👾",
        health: 1,
        max_health: 1,
        points: 10,
    };
    assert!(!e.is_dead());
    e.health -= 3;
    assert!(e.is_dead());
}

#[test]
fn entity_boxes_follow_position() {
    let b = Bullet {
        pos: Vec2::new(5.0, 6.0),
        half: Vec2::splat(3.0),
        angle: 0.0,
        speed: 8.0,
        damage: 1,
        color: Rgb::GOLD,
    };
    assert_eq!(b.aabb(), Aabb::new(Vec2::new(5.0, 6.0), Vec2::splat(3.0)));
}

// ── Difficulty ────────────────────────────────────────────────────────────────

#[test]
fn difficulty_names_round_trip() {
    for d in Difficulty::ALL {
        assert_eq!(Difficulty::from_name(d.name()), d);
    }
}

#[test]
fn difficulty_name_is_case_insensitive() {
    assert_eq!(Difficulty::from_name("HARD"), Difficulty::Hard);
    assert_eq!(Difficulty::from_name("  extreme "), Difficulty::Extreme);
}

#[test]
fn unknown_difficulty_falls_back_to_normal() {
    assert_eq!(Difficulty::from_name("nightmare"), Difficulty::Normal);
    assert_eq!(Difficulty::from_name(""), Difficulty::Normal);
}

#[test]
fn desktop_difficulty_table() {
    let easy = DifficultyConfig::new(Difficulty::Easy, DeviceProfile::Desktop);
    assert_eq!(easy.name, "Easy");
    assert_eq!(easy.player_speed, 3.5);
    assert_eq!(easy.enemy_speed_multiplier, 0.7);
    assert_eq!(easy.enemy_spawn_rate, 0.08);
    assert_eq!(easy.max_enemies, 5);
    assert_eq!(easy.enemies_per_wave, 8);
    assert_eq!(easy.power_up_rate, 0.25);
    assert_eq!(easy.player_lives, 5);
    assert_eq!(easy.damage_multiplier, 0.8);
    assert_eq!(easy.spawn_interval, 90);

    let extreme = DifficultyConfig::new(Difficulty::Extreme, DeviceProfile::Desktop);
    assert_eq!(extreme.player_speed, 2.5);
    assert_eq!(extreme.max_enemies, 10);
    assert_eq!(extreme.enemies_per_wave, 25);
    assert_eq!(extreme.player_lives, 1);
    assert_eq!(extreme.spawn_interval, 45);
}

#[test]
fn device_changes_only_speed_and_cap() {
    let desktop = DifficultyConfig::new(Difficulty::Normal, DeviceProfile::Desktop);
    let tablet = DifficultyConfig::new(Difficulty::Normal, DeviceProfile::Tablet);
    let phone = DifficultyConfig::new(Difficulty::Normal, DeviceProfile::Phone);

    assert_eq!((desktop.player_speed, desktop.max_enemies), (3.0, 6));
    assert_eq!((tablet.player_speed, tablet.max_enemies), (2.8, 5));
    assert_eq!((phone.player_speed, phone.max_enemies), (2.5, 4));

    assert_eq!(tablet.enemies_per_wave, desktop.enemies_per_wave);
    assert_eq!(phone.player_lives, desktop.player_lives);
    assert_eq!(phone.spawn_interval, desktop.spawn_interval);
}

// ── Device profiles ───────────────────────────────────────────────────────────

#[test]
fn only_desktop_is_not_touch() {
    assert!(!DeviceProfile::Desktop.is_touch());
    assert!(DeviceProfile::Tablet.is_touch());
    assert!(DeviceProfile::Phone.is_touch());
}

#[test]
fn weapon_durations_in_ticks() {
    let d = DeviceProfile::Desktop;
    assert_eq!(d.weapon_duration(WeaponKind::Rapid), 600);
    assert_eq!(d.weapon_duration(WeaponKind::Heavy), 480);
    assert_eq!(d.weapon_duration(WeaponKind::Spread), 720);

    let t = DeviceProfile::Tablet;
    assert_eq!(t.weapon_duration(WeaponKind::Rapid), 480);
    assert_eq!(t.weapon_duration(WeaponKind::Heavy), 360);
    assert_eq!(t.weapon_duration(WeaponKind::Spread), 600);
}

#[test]
fn weapons_carry_their_kind() {
    for kind in [WeaponKind::Basic, WeaponKind::Rapid, WeaponKind::Heavy, WeaponKind::Spread] {
        assert_eq!(DeviceProfile::Phone.weapon(kind).kind, kind);
    }
    assert_eq!(DeviceProfile::Desktop.weapon(WeaponKind::Rapid).fire_rate, 3);
}

#[test]
fn archetypes_match_roster() {
    let roster = DeviceProfile::Desktop.enemy_archetypes();
    let points: Vec<u32> = roster.iter().map(|a| a.points).collect();
    assert_eq!(points, vec![10, 20, 15, 30, 25]);
    assert_eq!(roster.iter().filter(|a| a.health == 2).count(), 1);
}

#[test]
fn particle_quality_scale() {
    assert_eq!(ParticleQuality::Low.scale(15), 8);
    assert_eq!(ParticleQuality::Medium.scale(15), 15);
    assert_eq!(ParticleQuality::High.scale(10), 15);
    assert_eq!(ParticleQuality::High.scale(15), 23);
}
