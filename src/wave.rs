/// Wave state machine.
///
/// ```text
///   WaveActive ──(quota spawned + quota killed + field empty)──▶ WaveComplete
///        ▲                                                           │
///        └──────────────(next-wave countdown reaches 0)──────────────┘
/// ```
use rand::Rng;
use tracing::info;

use crate::entities::{SimulationState, WaveManager};
use crate::events::GameEvent;
use crate::spawn::spawn_enemy;

/// Score bonus per wave number on completion.
pub const WAVE_CLEAR_BONUS: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WavePhase {
    Active,
    Complete,
}

/// Enemies needed for `wave`: the base quota plus two more every three waves.
pub fn enemies_required(base: u32, wave: u32) -> u32 {
    base + (wave.saturating_sub(1) / 3) * 2
}

impl WaveManager {
    /// State for the very first wave of a game.
    pub fn new() -> Self {
        WaveManager {
            enemies_spawned: 0,
            enemies_killed: 0,
            last_spawn_frame: None,
            wave_active: true,
            next_wave_delay: 0,
            force_spawn_timer: 0,
        }
    }

    /// Fresh counters for a wave starting on `frame`.
    pub fn starting_at(frame: u64) -> Self {
        WaveManager {
            last_spawn_frame: Some(frame),
            ..WaveManager::new()
        }
    }

    pub fn phase(&self) -> WavePhase {
        if self.wave_active {
            WavePhase::Active
        } else {
            WavePhase::Complete
        }
    }

    /// Credit a kill made by damage.  Contact removals never come through here.
    pub fn record_kill(&mut self) {
        self.enemies_killed += 1;
    }

    /// Hand a spawn back to the quota for an enemy that left without dying.
    pub fn refund_spawn(&mut self) {
        self.enemies_spawned = self.enemies_spawned.saturating_sub(1);
    }

    pub fn is_cleared(&self, required: u32, live_enemies: usize) -> bool {
        self.enemies_spawned >= required && self.enemies_killed >= required && live_enemies == 0
    }
}

impl Default for WaveManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate wave completion and advance the inter-wave countdown.
pub fn manage_waves(state: &mut SimulationState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let required = state.game.enemies_this_wave;

    if state.waves.wave_active && state.waves.is_cleared(required, state.enemies.len()) {
        let bonus = state.game.wave * WAVE_CLEAR_BONUS;
        state.waves.wave_active = false;
        state.waves.next_wave_delay = state.profile.next_wave_delay();
        state.game.wave_complete = true;
        state.game.score += bonus;
        info!(
            wave = state.game.wave,
            killed = state.waves.enemies_killed,
            required,
            bonus,
            "wave complete"
        );
        events.push(GameEvent::WaveComplete {
            wave: state.game.wave,
            bonus,
        });
    }

    if !state.waves.wave_active && state.waves.next_wave_delay > 0 {
        state.waves.next_wave_delay -= 1;
        if state.waves.next_wave_delay == 0 {
            start_next_wave(state, rng, events);
        }
    }
}

/// Move to the next wave: recompute the quota, reset the counters and make
/// sure the field is not idle on the first frame.
pub fn start_next_wave(state: &mut SimulationState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    state.game.wave += 1;
    state.game.wave_complete = false;
    state.game.enemies_this_wave = enemies_required(state.config.enemies_per_wave, state.game.wave);
    state.waves = WaveManager::starting_at(state.frame);

    info!(
        wave = state.game.wave,
        required = state.game.enemies_this_wave,
        "wave started"
    );
    events.push(GameEvent::WaveStarted {
        wave: state.game.wave,
        enemies: state.game.enemies_this_wave,
    });

    if state.enemies.is_empty() {
        spawn_enemy(state, rng);
        state.waves.enemies_spawned += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_steps_every_three_waves() {
        assert_eq!(enemies_required(8, 1), 8);
        assert_eq!(enemies_required(8, 3), 8);
        assert_eq!(enemies_required(8, 4), 10);
        assert_eq!(enemies_required(8, 7), 12);
    }

    #[test]
    fn cleared_needs_all_three_conditions() {
        let mut w = WaveManager::new();
        w.enemies_spawned = 8;
        w.enemies_killed = 8;
        assert!(w.is_cleared(8, 0));
        assert!(!w.is_cleared(8, 1));
        w.enemies_killed = 7;
        assert!(!w.is_cleared(8, 0));
    }

    #[test]
    fn refund_never_underflows() {
        let mut w = WaveManager::new();
        w.refund_spawn();
        assert_eq!(w.enemies_spawned, 0);
    }
}
