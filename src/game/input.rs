use super::direction::{Axis, Sign};

/// Turn intents captured between two ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingTurn {
    pub horizontal: Option<Sign>,
    pub vertical: Option<Sign>,
}

/// Holds the latest raw steering intent per axis until the next tick.
///
/// Every frame may write to it; only the tick drains it.
#[derive(Debug, Clone, Default)]
pub struct TurnInputBuffer {
    pending: PendingTurn,
}

impl TurnInputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a raw axis sample. Zero samples leave the buffer untouched,
    /// a nonzero one overwrites whatever was buffered for that axis.
    pub fn record(&mut self, axis: Axis, value: f32) {
        let Some(sign) = Sign::of(value) else {
            return;
        };
        match axis {
            Axis::Horizontal => self.pending.horizontal = Some(sign),
            Axis::Vertical => self.pending.vertical = Some(sign),
        }
    }

    /// Hand out both buffered intents and clear them, whether or not they were set
    pub fn consume_and_clear(&mut self) -> PendingTurn {
        std::mem::take(&mut self.pending)
    }
}
