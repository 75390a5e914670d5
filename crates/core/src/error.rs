//! Engine error taxonomy.
//!
//! Every variant is either a broken caller precondition or an explicit
//! "nothing to do" signal. None of them are retried.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("coordinate ({x}, {y}) is outside a {size}x{size} grid")]
    InvalidCoordinate { x: usize, y: usize, size: usize },

    #[error("game has not been started")]
    UninitializedGame,

    #[error("no empty cell left to spawn a tile")]
    NoEmptyCellForSpawn,

    #[error("invalid board size {0}, expected at least 1")]
    InvalidBoardSize(usize),

    #[error("invalid tile value {0:?}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
