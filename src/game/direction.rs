use super::input::PendingTurn;

/// One of the two grid axes the snake can travel along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right, the x axis
    Horizontal,
    /// Up/down, the z axis
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Sign of a raw axis sample. Zero (and NaN) carry no intent.
    pub fn of(value: f32) -> Option<Sign> {
        if value > 0.0 {
            Some(Sign::Positive)
        } else if value < 0.0 {
            Some(Sign::Negative)
        } else {
            None
        }
    }

    pub fn unit(self) -> i32 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }

    pub fn flipped(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

/// Axis-locked direction of travel.
///
/// Exactly one axis is active at a time. A turn is only ever taken onto the
/// other axis, so the snake can never reverse onto itself in a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Moving along x
    X(Sign),
    /// Moving along z
    Z(Sign),
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Z(Sign::Positive)
    }
}

impl Direction {
    /// Returns the (dx, dz) step for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match *self {
            Direction::X(sign) => (sign.unit(), 0),
            Direction::Z(sign) => (0, sign.unit()),
        }
    }

    pub fn opposite(&self) -> Direction {
        match *self {
            Direction::X(sign) => Direction::X(sign.flipped()),
            Direction::Z(sign) => Direction::Z(sign.flipped()),
        }
    }

    /// Apply the buffered turn intents for one tick.
    ///
    /// Only intent on the inactive axis is honoured; anything on the active
    /// axis, reversal included, is dropped.
    pub fn resolve(self, pending: PendingTurn) -> Direction {
        match self {
            Direction::Z(_) => match pending.horizontal {
                Some(sign) => Direction::X(sign),
                None => self,
            },
            Direction::X(_) => match pending.vertical {
                Some(sign) => Direction::Z(sign),
                None => self,
            },
        }
    }
}
