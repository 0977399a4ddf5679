use alloc::collections::BTreeSet;
use core::cmp::Ordering;

use super::Clue;
use crate::*;

/// Local mine-likelihood of a clue: label over unrevealed neighbors, kept as an exact ratio.
#[derive(Copy, Clone, Debug)]
pub struct MineLikelihood {
    mines: u8,
    unknown: u8,
}

impl MineLikelihood {
    /// `None` when the clue has no unrevealed neighbor and so no ratio.
    pub fn of(clue: &Clue) -> Option<Self> {
        let unknown = u8::try_from(clue.unknown.len()).ok().filter(|&n| n > 0)?;
        Some(Self {
            mines: clue.mines,
            unknown,
        })
    }
}

impl PartialEq for MineLikelihood {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MineLikelihood {}

impl PartialOrd for MineLikelihood {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MineLikelihood {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u16::from(self.mines) * u16::from(other.unknown);
        let rhs = u16::from(other.mines) * u16::from(self.unknown);
        lhs.cmp(&rhs)
    }
}

/// Clue with the lowest local mine-likelihood that still offers a candidate to reveal.
///
/// Clues are expected in row-major order; among equal ratios the first one wins.
pub fn safest_clue<'a>(clues: &'a [Clue], inferred_mines: &BTreeSet<Coord2>) -> Option<&'a Clue> {
    clues
        .iter()
        .filter(|clue| clue.candidates(inferred_mines).next().is_some())
        .filter_map(|clue| Some((MineLikelihood::of(clue)?, clue)))
        .min_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs))
        .map(|(likelihood, clue)| {
            log::debug!(
                "fallback on {:?} at {}/{}",
                clue.coords,
                likelihood.mines,
                likelihood.unknown
            );
            clue
        })
}
