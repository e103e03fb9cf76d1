use std::time::Duration;

/// Fixed-interval tick scheduler, independent of the frame rate.
///
/// Time left over past the period when a tick fires is dropped, so slow
/// frames never queue up extra ticks.
#[derive(Debug, Clone)]
pub struct GameClock {
    period: Duration,
    accumulated: Duration,
}

impl GameClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            accumulated: Duration::ZERO,
        }
    }

    /// Add one frame's elapsed time. Returns true when a tick is due.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated >= self.period {
            self.accumulated = Duration::ZERO;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
