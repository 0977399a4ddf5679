use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {mines} mines on a {dimension}x{dimension} grid")]
    InvalidConfiguration { dimension: Coord, mines: CellCount },
    #[error("Move ({row}, {col}) is outside the {dimension}x{dimension} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        dimension: Coord,
    },
    #[error("No candidate move left to select")]
    NoCandidateMove,
    #[error("Malformed move, expected \"row,col\"")]
    MalformedMove,
    #[error("Visible view does not match the declared dimension")]
    InvalidViewShape,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
