use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Marker printed for a cell that has not been revealed.
pub const HIDDEN_MARKER: &str = " ";

/// What a player can see: the label of every revealed cell, nothing for the rest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibleView {
    cells: Array2<Option<CellLabel>>,
}

impl VisibleView {
    pub fn from_grid(grid: &Grid) -> Self {
        let dimension = grid.dimension();
        let mut cells = Array2::from_elem((dimension, dimension).to_nd_index(), None);
        for &coords in grid.revealed() {
            cells[coords.to_nd_index()] = Some(grid.label_at(coords));
        }
        Self { cells }
    }

    pub fn from_cells(cells: Array2<Option<CellLabel>>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidViewShape);
        }
        Ok(Self { cells })
    }

    pub fn dimension(&self) -> Coord {
        self.cells.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellLabel> {
        self.cells[coords.to_nd_index()]
    }

    pub fn is_hidden(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_none()
    }

    /// Text of one cell: the label if revealed, the blank marker otherwise.
    pub fn text_at(&self, coords: Coord2) -> String {
        match self.cell_at(coords) {
            Some(label) => label.to_string(),
            None => HIDDEN_MARKER.to_string(),
        }
    }

    /// Row-major text projection of the whole grid.
    pub fn to_text_rows(&self) -> Vec<Vec<String>> {
        let dimension = self.dimension();
        (0..dimension)
            .map(|row| (0..dimension).map(|col| self.text_at((row, col))).collect())
            .collect()
    }

    fn column_widths(&self) -> Vec<usize> {
        let dimension = self.dimension();
        (0..dimension)
            .map(|col| {
                let index_width = decimal_width(col);
                (0..dimension)
                    .map(|row| self.text_at((row, col)).len())
                    .fold(index_width, usize::max)
            })
            .collect()
    }
}

fn decimal_width(value: Coord) -> usize {
    match value {
        0..=9 => 1,
        10..=99 => 2,
        _ => 3,
    }
}

impl fmt::Display for VisibleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dimension = self.dimension();
        let widths = self.column_widths();
        let margin = decimal_width(dimension.saturating_sub(1));

        write!(f, "{:margin$}  ", "")?;
        for (col, width) in (0..dimension).zip(widths.iter().copied()) {
            write!(f, "{:<width$}  ", col)?;
        }
        writeln!(f)?;

        let rule_len = margin + 2 + widths.iter().map(|w| w + 2).sum::<usize>();
        let rule = "-".repeat(rule_len);
        writeln!(f, "{rule}")?;

        for row in 0..dimension {
            write!(f, "{:<margin$} |", row)?;
            for (col, width) in (0..dimension).zip(widths.iter().copied()) {
                write!(f, "{:<width$} |", self.text_at((row, col)))?;
            }
            writeln!(f)?;
        }

        write!(f, "{rule}")
    }
}
