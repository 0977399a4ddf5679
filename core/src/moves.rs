use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// A coordinate to reveal, exchanged as `"row,col"` text.
///
/// Parsed moves keep full-width numbers so that a move outside the grid can be
/// reported as such instead of failing to parse.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn validate(self, dimension: Coord) -> Result<Coord2> {
        let bound = usize::from(dimension);
        if self.row < bound && self.col < bound {
            Ok((self.row as Coord, self.col as Coord))
        } else {
            Err(GameError::OutOfRange {
                row: self.row,
                col: self.col,
                dimension,
            })
        }
    }
}

impl From<Coord2> for Move {
    fn from((row, col): Coord2) -> Self {
        Self::new(row.into(), col.into())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(text: &str) -> Result<Self> {
        let (row, col) = text.split_once(',').ok_or(GameError::MalformedMove)?;
        let row = row.trim().parse().map_err(|_| GameError::MalformedMove)?;
        let col = col.trim().parse().map_err(|_| GameError::MalformedMove)?;
        Ok(Self { row, col })
    }
}
