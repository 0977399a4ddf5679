use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// A revealed numbered cell together with its unrevealed neighbors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clue {
    pub coords: Coord2,
    pub mines: u8,
    pub unknown: Vec<Coord2>,
}

impl Clue {
    pub fn known_mines(&self, inferred_mines: &BTreeSet<Coord2>) -> usize {
        self.unknown
            .iter()
            .filter(|pos| inferred_mines.contains(pos))
            .count()
    }

    /// Unrevealed neighbors not already deduced to be mines.
    pub fn candidates<'a>(
        &'a self,
        inferred_mines: &'a BTreeSet<Coord2>,
    ) -> impl Iterator<Item = Coord2> + 'a {
        self.unknown
            .iter()
            .copied()
            .filter(move |pos| !inferred_mines.contains(pos))
    }
}

/// Collects every revealed numbered cell in row-major order.
///
/// Revealed mines (only present after a loss) carry no information and are skipped.
pub fn collect_clues(view: &VisibleView, revealed: &BTreeSet<Coord2>) -> Vec<Clue> {
    let dimension = view.dimension();
    revealed
        .iter()
        .filter(|&&(row, col)| row < dimension && col < dimension)
        .filter_map(|&coords| {
            let CellLabel::Count(mines) = view.cell_at(coords)? else {
                return None;
            };
            let unknown = NeighborIter::square(coords, dimension)
                .filter(|pos| !revealed.contains(pos))
                .collect();
            Some(Clue {
                coords,
                mines,
                unknown,
            })
        })
        .collect()
}

/// Everything the agent has deduced so far; entries are only ever added.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Knowledge {
    mines: BTreeSet<Coord2>,
    safe: BTreeSet<Coord2>,
}

impl Knowledge {
    pub fn mines(&self) -> &BTreeSet<Coord2> {
        &self.mines
    }

    pub fn safe(&self) -> &BTreeSet<Coord2> {
        &self.safe
    }

    /// A clue whose unrevealed neighbors number exactly its label has all of them as mines.
    pub fn deduce_mines(&mut self, clues: &[Clue]) -> usize {
        let before = self.mines.len();
        for clue in clues {
            if clue.unknown.len() == usize::from(clue.mines) {
                log::trace!("{:?} saturated, {} mines", clue.coords, clue.mines);
                self.mines.extend(clue.unknown.iter().copied());
            }
        }
        self.mines.len() - before
    }

    /// A clue whose label is fully accounted for by known mines has only safe neighbors left.
    pub fn deduce_safe(&mut self, clues: &[Clue]) -> usize {
        let before = self.safe.len();
        for clue in clues {
            if clue.unknown.len() > usize::from(clue.mines)
                && clue.known_mines(&self.mines) == usize::from(clue.mines)
            {
                log::trace!("{:?} satisfied, rest is safe", clue.coords);
                self.safe
                    .extend(clue.unknown.iter().copied().filter(|pos| !self.mines.contains(pos)));
            }
        }
        self.safe.len() - before
    }

    /// Deduced safe cells that have not been revealed yet.
    pub fn pending_safe(&self, revealed: &BTreeSet<Coord2>) -> Vec<Coord2> {
        self.safe.difference(revealed).copied().collect()
    }
}

#[cfg(test)]
impl Knowledge {
    pub(crate) fn seeded(mines: &[Coord2], safe: &[Coord2]) -> Self {
        Self {
            mines: mines.iter().copied().collect(),
            safe: safe.iter().copied().collect(),
        }
    }
}
