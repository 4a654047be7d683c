//! Pathfinding error type.

use thiserror::Error;

use wb_core::Position;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("search endpoint {0} is outside the grid")]
    OutOfBounds(Position),
}

pub type PathResult<T> = Result<T, PathError>;
