//! Grid-subsystem error type.

use thiserror::Error;

use wb_core::Position;

/// Errors produced by `wb-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("invalid map data at cell {cell}: {reason}")]
    Validation { cell: Position, reason: String },

    #[error("connection {from} -> {to} must have weight >= 1")]
    InvalidWeight { from: Position, to: Position },

    #[error("map parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GridResult<T> = Result<T, GridError>;
