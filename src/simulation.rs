/// Simulation driver: owns one game's state, its RNG and the observers that
/// listen to it.
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::compute::{init_state, tick};
use crate::config::Settings;
use crate::entities::{GameStatus, GameSummary, SimulationState};
use crate::events::{GameEvent, GameObserver};
use crate::input::InputSample;
use crate::tuning::TICKS_PER_SECOND;

/// Longest real-time gap fed into the clock at once; anything beyond it is
/// dropped instead of being replayed as a burst of ticks.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Fixed-timestep accumulator.  Converts real elapsed time into a whole number
/// of simulation ticks at [`TICKS_PER_SECOND`], carrying the remainder over to
/// the next frame.  The front-end can render at any rate without changing game
/// speed.
#[derive(Debug, Clone)]
pub struct FixedStep {
    tick_duration: Duration,
    accumulator: Duration,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedStep {
    pub fn new() -> Self {
        Self {
            tick_duration: Duration::from_secs_f64(1.0 / TICKS_PER_SECOND as f64),
            accumulator: Duration::ZERO,
        }
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Add `elapsed` real time and return how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.min(MAX_FRAME_DELTA);
        let mut due = 0;
        while self.accumulator >= self.tick_duration {
            self.accumulator -= self.tick_duration;
            due += 1;
        }
        due
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

pub struct Simulation<R: Rng = StdRng> {
    state: SimulationState,
    rng: R,
    observers: Vec<Box<dyn GameObserver>>,
    /// Events produced by the most recent step.
    events: Vec<GameEvent>,
    summary: Option<GameSummary>,
}

impl Simulation<StdRng> {
    /// Build a game from settings.  A configured seed makes the run repeatable.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut state = init_state(
            settings.difficulty(),
            settings.device_profile,
            settings.playfield(),
        );
        state.quality = settings.particle_quality;
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(state, rng)
    }
}

impl<R: Rng> Simulation<R> {
    pub fn new(state: SimulationState, rng: R) -> Self {
        info!(
            difficulty = state.difficulty.name(),
            profile = ?state.profile,
            required = state.game.enemies_this_wave,
            "game started"
        );
        Self {
            state,
            rng,
            observers: Vec::new(),
            events: Vec::new(),
            summary: None,
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Read-only view for renderers.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn last_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Final result, available once the game is over.
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    /// Run one tick and then notify observers of what happened in it.
    pub fn step(&mut self, input: &InputSample) {
        self.events.clear();
        tick(&mut self.state, input, &mut self.rng, &mut self.events);

        for event in &self.events {
            if let GameEvent::GameOver(summary) = event {
                self.summary = Some(summary.clone());
            }
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
    }

    /// Run as many ticks as `clock` says are due after `elapsed` real time,
    /// all with the same input.  Returns the number of ticks run.
    pub fn advance(&mut self, clock: &mut FixedStep, elapsed: Duration, input: &InputSample) -> u32 {
        let due = clock.advance(elapsed);
        for _ in 0..due {
            self.step(input);
        }
        due
    }

    pub fn is_paused(&self) -> bool {
        self.state.game.status == GameStatus::Paused
    }

    pub fn pause(&mut self) {
        if self.state.game.status == GameStatus::Playing {
            self.state.game.status = GameStatus::Paused;
            info!("game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state.game.status == GameStatus::Paused {
            self.state.game.status = GameStatus::Playing;
            info!("game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Start over with the same difficulty, profile and playfield.
    /// Observers stay subscribed.
    pub fn restart(&mut self) {
        let quality = self.state.quality;
        self.state = init_state(self.state.difficulty, self.state.profile, self.state.field);
        self.state.quality = quality;
        self.events.clear();
        self.summary = None;
        info!(difficulty = self.state.difficulty.name(), "game restarted");
    }
}
