#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use agent::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use moves::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod agent;
mod cell;
mod error;
mod generator;
mod grid;
mod moves;
mod session;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub dimension: Coord,
    pub mines: CellCount,
}

impl GridConfig {
    /// Validates that the grid is non-empty and leaves at least one safe cell.
    pub fn new(dimension: Coord, mines: CellCount) -> Result<Self> {
        if dimension == 0 || mines == 0 || mines >= square(dimension) {
            return Err(GameError::InvalidConfiguration { dimension, mines });
        }
        Ok(Self { dimension, mines })
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.dimension)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Empty `dimension × dimension` mask, mines are set through `IndexMut`.
    pub(crate) fn empty(dimension: Coord) -> Self {
        Self {
            mine_mask: Array2::default((dimension, dimension).to_nd_index()),
            mine_count: 0,
        }
    }

    pub fn from_mine_coords(dimension: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(dimension);

        for &coords in mine_coords {
            layout.validate_coords(coords)?;
            if !layout[coords] {
                layout[coords] = true;
                layout.mine_count += 1;
            }
        }

        GridConfig::new(dimension, layout.mine_count)?;
        Ok(layout)
    }

    pub fn config(&self) -> GridConfig {
        GridConfig {
            dimension: self.dimension(),
            mines: self.mine_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let dimension = self.dimension();
        if coords.0 < dimension && coords.1 < dimension {
            Ok(coords)
        } else {
            Err(GameError::OutOfRange {
                row: coords.0.into(),
                col: coords.1.into(),
                dimension,
            })
        }
    }

    pub fn dimension(&self) -> Coord {
        self.mine_mask.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Label of `coords` derived from the mask; mines never get a count.
    pub fn label_at(&self, coords: Coord2) -> CellLabel {
        if self[coords] {
            return CellLabel::Mine;
        }
        let count = self
            .mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count();
        CellLabel::Count(count as u8)
    }

    /// Marks `coords` as a mine, returning `false` if it already was one.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        if self[coords] {
            return false;
        }
        self[coords] = true;
        self.mine_count += 1;
        true
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    Hit,
    Cleared,
}

impl RevealOutcome {
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_degenerate_grids() {
        assert!(GridConfig::new(3, 1).is_ok());
        assert!(GridConfig::new(3, 8).is_ok());
        assert_eq!(
            GridConfig::new(3, 9),
            Err(GameError::InvalidConfiguration {
                dimension: 3,
                mines: 9
            })
        );
        assert!(GridConfig::new(3, 0).is_err());
        assert!(GridConfig::new(0, 1).is_err());
    }

    #[test]
    fn layout_from_coords_collapses_duplicates() {
        let layout = MineLayout::from_mine_coords(3, &[(0, 0), (0, 0), (2, 1)]).unwrap();
        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine((2, 1)));
        assert_eq!(layout.label_at((1, 1)), CellLabel::Count(2));
        assert_eq!(layout.label_at((0, 0)), CellLabel::Mine);
    }

    #[test]
    fn layout_from_coords_rejects_out_of_range() {
        assert_eq!(
            MineLayout::from_mine_coords(3, &[(3, 0)]),
            Err(GameError::OutOfRange {
                row: 3,
                col: 0,
                dimension: 3
            })
        );
    }
}
