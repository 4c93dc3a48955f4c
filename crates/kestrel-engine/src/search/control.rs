//! Time budget for one turn.

use std::time::Duration;

use kestrel_core::Clock;

/// Stops the search once `elapsed × restriction > total`.
///
/// `total` is the time remaining when the turn started; with the default
/// restriction of 30 a turn uses roughly a thirtieth of what is left.
pub struct TimeBudget<'a> {
    clock: &'a dyn Clock,
    total: Duration,
    restriction: u32,
}

impl<'a> TimeBudget<'a> {
    /// Capture the clock's remaining time as this turn's total.
    pub fn start(clock: &'a dyn Clock, restriction: u32) -> Self {
        Self {
            clock,
            total: clock.remaining(),
            restriction,
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed_this_turn()
    }

    /// Whether the turn has used up its share of the clock.
    pub fn exceeded(&self) -> bool {
        self.elapsed().saturating_mul(self.restriction) > self.total
    }
}
