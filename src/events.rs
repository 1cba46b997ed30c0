/// Notification hooks published by the simulation.
///
/// Events are buffered while a tick runs and handed to observers only after
/// the tick has finished, so an observer can never change the outcome of the
/// frame it is watching.
use tracing::trace;

use crate::entities::{GameSummary, PowerUpKind, WeaponKind};

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    ShotFired { weapon: WeaponKind },
    /// An enemy took damage but survived.
    EnemyHit { health_left: i32 },
    EnemyKilled { points: u32 },
    PlayerHurt { lives_left: u32 },
    PowerUpCollected { kind: PowerUpKind },
    WaveComplete { wave: u32, bonus: u32 },
    WaveStarted { wave: u32, enemies: u32 },
    /// A temporary weapon ran out and the basic gun is back.
    WeaponExpired { weapon: WeaponKind },
    GameOver(GameSummary),
}

/// Subscriber interface for audio, UI or anything else outside the core.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

/// Collecting observer, mostly useful in tests.
impl GameObserver for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Logs every event at `trace` level.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn on_event(&mut self, event: &GameEvent) {
        trace!(?event, "game event");
    }
}
