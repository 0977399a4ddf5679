use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Playing field: fixed labels plus the growing set of revealed coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    labels: Array2<CellLabel>,
    mine_count: CellCount,
    revealed: BTreeSet<Coord2>,
    triggered_mine: Option<Coord2>,
}

impl Grid {
    pub fn new(layout: &MineLayout) -> Self {
        let dimension = layout.dimension();
        let labels = Array2::from_shape_fn((dimension, dimension).to_nd_index(), |(row, col)| {
            layout.label_at((row as Coord, col as Coord))
        });
        Self {
            labels,
            mine_count: layout.mine_count(),
            revealed: BTreeSet::new(),
            triggered_mine: None,
        }
    }

    pub fn generate(config: GridConfig, seed: u64) -> Result<Self> {
        let config = GridConfig::new(config.dimension, config.mines)?;
        Ok(Self::new(&RandomMineGenerator::new(seed).generate(config)))
    }

    pub fn from_mine_coords(dimension: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        Ok(Self::new(&MineLayout::from_mine_coords(dimension, mine_coords)?))
    }

    pub fn dimension(&self) -> Coord {
        self.labels.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn config(&self) -> GridConfig {
        GridConfig {
            dimension: self.dimension(),
            mines: self.mine_count,
        }
    }

    pub fn revealed(&self) -> &BTreeSet<Coord2> {
        &self.revealed
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed.contains(&coords)
    }

    pub fn label_at(&self, coords: Coord2) -> CellLabel {
        self.labels[coords.to_nd_index()]
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
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

    /// Reveals `coords`, flooding outward through zero-labelled cells.
    ///
    /// The coordinate is recorded before its label is inspected, so a mine hit still
    /// shows up in the revealed set. Revealing an already revealed cell reports the
    /// same outcome again without expanding anything.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let label = self.label_at(coords);

        if !self.revealed.insert(coords) {
            return Ok(outcome_of(label));
        }

        match label {
            CellLabel::Mine => {
                log::debug!("mine hit at {:?}", coords);
                self.triggered_mine = Some(coords);
                return Ok(RevealOutcome::Hit);
            }
            CellLabel::Count(0) => self.flood_fill(coords),
            CellLabel::Count(_) => {}
        }

        Ok(RevealOutcome::Cleared)
    }

    /// Worklist expansion from a zero cell; the revealed set doubles as the visited guard.
    fn flood_fill(&mut self, origin: Coord2) {
        let dimension = self.dimension();
        let mut to_visit: VecDeque<Coord2> = NeighborIter::square(origin, dimension)
            .filter(|pos| !self.revealed.contains(pos))
            .collect();
        let mut opened = 0usize;

        while let Some(visit_coords) = to_visit.pop_front() {
            if !self.revealed.insert(visit_coords) {
                continue;
            }
            opened += 1;

            // a zero cell never borders a mine, so the worklist only ever holds counts
            if self.label_at(visit_coords) == CellLabel::Count(0) {
                to_visit.extend(
                    NeighborIter::square(visit_coords, dimension)
                        .filter(|pos| !self.revealed.contains(pos)),
                );
            }
        }

        log::trace!("flood fill from {:?} opened {} cells", origin, opened);
    }

    pub fn visible_view(&self) -> VisibleView {
        VisibleView::from_grid(self)
    }

    /// Every safe cell is revealed and no mine went off.
    pub fn is_won(&self) -> bool {
        self.triggered_mine.is_none()
            && self.revealed.len() == usize::from(self.config().safe_cells())
    }

    pub fn reveal_all(&mut self) {
        self.revealed.extend(iter_coords(self.dimension()));
    }
}

const fn outcome_of(label: CellLabel) -> RevealOutcome {
    match label {
        CellLabel::Mine => RevealOutcome::Hit,
        CellLabel::Count(_) => RevealOutcome::Cleared,
    }
}
