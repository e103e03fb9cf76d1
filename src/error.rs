use thiserror::Error;

/// Errors raised by the simulation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Every cell of the board is covered by the snake, so no berry can spawn.
    #[error("board is full: no free cell left for a berry")]
    BoardFull,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
