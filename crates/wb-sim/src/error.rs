use wb_core::{CoreError, Position};
use wb_grid::GridError;
use wb_path::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("pathfinding error: {0}")]
    Path(#[from] PathError),

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "insufficient components: need at least one robot, package and goal \
         (have {robots}, {packages}, {goals})"
    )]
    NotReady {
        robots:   usize,
        packages: usize,
        goals:    usize,
    },

    #[error("cannot place {what} at {position}: {reason}")]
    Placement {
        what:     String,
        position: Position,
        reason:   &'static str,
    },
}

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        SimError::Config(e.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;
