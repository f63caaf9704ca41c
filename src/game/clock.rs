use std::time::{Duration, Instant};

/// A stopwatch that only accumulates time while the game is unpaused.
///
/// Bomb fuses and the elapsed-time display both read this clock, so pausing
/// freezes them together and nothing "catches up" on resume.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct GameClock {
    /// Time accumulated over previous unpaused stretches
    accrued: Duration,

    /// When the current unpaused stretch began, or `None` while paused
    running_since: Option<Instant>,
}

impl GameClock {
    /// Create a clock, already running from zero
    pub(super) fn start() -> GameClock {
        GameClock {
            accrued: Duration::ZERO,
            running_since: Some(Instant::now()),
        }
    }

    /// Stop accumulating time
    pub(super) fn pause(&mut self) {
        if let Some(started) = self.running_since.take() {
            self.accrued += started.elapsed();
        }
    }

    /// Start accumulating time again
    pub(super) fn resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    /// Total unpaused time since the clock was started
    pub(super) fn now(&self) -> Duration {
        match self.running_since {
            Some(started) => self.accrued + started.elapsed(),
            None => self.accrued,
        }
    }
}
