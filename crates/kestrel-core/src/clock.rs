//! Read-only view of the game clock supplied by the host.

use std::time::{Duration, Instant};

/// The side to move's clock, as seen by the engine.
pub trait Clock {
    /// Time remaining on the mover's clock.
    fn remaining(&self) -> Duration;

    /// Time spent since the current turn began.
    fn elapsed_this_turn(&self) -> Duration;
}

/// A clock that starts ticking when the turn begins.
#[derive(Debug, Clone, Copy)]
pub struct TurnClock {
    remaining_at_start: Duration,
    started: Instant,
}

impl TurnClock {
    /// Start a turn with `remaining` time on the clock.
    pub fn start(remaining: Duration) -> Self {
        Self {
            remaining_at_start: remaining,
            started: Instant::now(),
        }
    }
}

impl Clock for TurnClock {
    fn remaining(&self) -> Duration {
        self.remaining_at_start
            .saturating_sub(self.started.elapsed())
    }

    fn elapsed_this_turn(&self) -> Duration {
        self.started.elapsed()
    }
}

/// A clock that never advances. Useful for depth-limited searches.
#[derive(Debug, Clone, Copy)]
pub struct FrozenClock {
    remaining: Duration,
}

impl FrozenClock {
    pub fn new(remaining: Duration) -> Self {
        Self { remaining }
    }

    /// A clock with effectively infinite time.
    pub fn unlimited() -> Self {
        Self::new(Duration::MAX)
    }
}

impl Clock for FrozenClock {
    fn remaining(&self) -> Duration {
        self.remaining
    }

    fn elapsed_this_turn(&self) -> Duration {
        Duration::ZERO
    }
}
