use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use rand::prelude::*;

use crate::*;
pub use knowledge::*;
pub use likelihood::*;

mod knowledge;
mod likelihood;

/// Source of uniform choices among `len` candidates, `len > 0`.
pub trait IndexSource {
    fn pick_index(&mut self, len: usize) -> usize;
}

impl IndexSource for SmallRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Anything that proposes the next move from what a player can see.
pub trait MoveSource {
    fn next_move(
        &mut self,
        view: &VisibleView,
        revealed: &BTreeSet<Coord2>,
        dimension: Coord,
    ) -> Result<Move>;

    /// Deductions kept between turns, if the player keeps any.
    fn deductions(&self) -> Option<&Knowledge> {
        None
    }
}

/// Plays a grid through its visible view only, remembering what it deduced between turns.
///
/// One agent belongs to one grid; start a fresh agent for every new game.
#[derive(Clone, Debug)]
pub struct InferenceAgent<S = SmallRng> {
    knowledge: Knowledge,
    source: S,
}

impl InferenceAgent<SmallRng> {
    pub fn new(seed: u64) -> Self {
        Self::with_source(SmallRng::seed_from_u64(seed))
    }
}

impl<S: IndexSource> InferenceAgent<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            knowledge: Knowledge::default(),
            source,
        }
    }

    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    pub fn inferred_mines(&self) -> &BTreeSet<Coord2> {
        self.knowledge.mines()
    }

    pub fn inferred_safe(&self) -> &BTreeSet<Coord2> {
        self.knowledge.safe()
    }

    /// Chooses the next coordinate to reveal.
    ///
    /// Deduces mines, then safe cells, from every revealed clue; then prefers a pending
    /// safe cell, opens at random while nothing has ever been deduced safe, and otherwise
    /// guesses next to the clue with the lowest local mine-likelihood.
    pub fn decide_move(
        &mut self,
        view: &VisibleView,
        revealed: &BTreeSet<Coord2>,
        dimension: Coord,
    ) -> Result<Move> {
        if view.dimension() != dimension {
            return Err(GameError::InvalidViewShape);
        }

        let clues = collect_clues(view, revealed);
        let new_mines = self.knowledge.deduce_mines(&clues);
        let new_safe = self.knowledge.deduce_safe(&clues);
        log::debug!(
            "{} clues, {} new mines, {} new safe cells",
            clues.len(),
            new_mines,
            new_safe
        );

        let coords = self.select(&clues, revealed, dimension)?;
        log::debug!("agent picks {:?}", coords);
        Ok(Move::from(coords))
    }

    /// Picks among pending safe cells, then the opening pool, then the safest clue's neighbors.
    ///
    /// The opening pool leaves out revealed cells and inferred mines, so on a fresh grid it
    /// covers all N² cells and every later draw reveals something new.
    fn select(
        &mut self,
        clues: &[Clue],
        revealed: &BTreeSet<Coord2>,
        dimension: Coord,
    ) -> Result<Coord2> {
        let pending = self.knowledge.pending_safe(revealed);
        if !pending.is_empty() {
            return self.pick(&pending);
        }

        if self.knowledge.safe().is_empty() {
            let mines = self.knowledge.mines();
            let opening: Vec<Coord2> = iter_coords(dimension)
                .filter(|pos| !revealed.contains(pos) && !mines.contains(pos))
                .collect();
            return self.pick(&opening);
        }

        let clue = safest_clue(clues, self.knowledge.mines()).ok_or(GameError::NoCandidateMove)?;
        let candidates: Vec<Coord2> = clue.candidates(self.knowledge.mines()).collect();
        self.pick(&candidates)
    }

    fn pick(&mut self, pool: &[Coord2]) -> Result<Coord2> {
        if pool.is_empty() {
            return Err(GameError::NoCandidateMove);
        }
        let index = self.source.pick_index(pool.len());
        pool.get(index).copied().ok_or(GameError::NoCandidateMove)
    }
}

impl<S: IndexSource> MoveSource for InferenceAgent<S> {
    fn next_move(
        &mut self,
        view: &VisibleView,
        revealed: &BTreeSet<Coord2>,
        dimension: Coord,
    ) -> Result<Move> {
        self.decide_move(view, revealed, dimension)
    }

    fn deductions(&self) -> Option<&Knowledge> {
        Some(&self.knowledge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use ndarray::Array2;

    /// Replays fixed indices, wrapping each one into range.
    struct Scripted(Vec<usize>);

    impl IndexSource for Scripted {
        fn pick_index(&mut self, len: usize) -> usize {
            let next = if self.0.is_empty() { 0 } else { self.0.remove(0) };
            next % len
        }
    }

    fn view_of(grid: &Grid, revealed: &BTreeSet<Coord2>) -> VisibleView {
        let dimension = grid.dimension();
        let cells = Array2::from_shape_fn((dimension, dimension).to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            revealed.contains(&coords).then(|| grid.label_at(coords))
        });
        VisibleView::from_cells(cells).unwrap()
    }

    #[test]
    fn first_move_uses_the_whole_grid() {
        let grid = Grid::from_mine_coords(4, &[(0, 0)]).unwrap();
        let mut agent = InferenceAgent::with_source(Scripted(vec![5]));

        let chosen = agent
            .decide_move(&grid.visible_view(), grid.revealed(), 4)
            .unwrap();

        assert_eq!(chosen, Move::new(1, 1));
        assert_eq!(chosen.to_string(), "1,1");
    }

    #[test]
    fn seeded_first_move_is_reproducible() {
        let grid = Grid::from_mine_coords(9, &[(4, 4)]).unwrap();
        let view = grid.visible_view();

        let first = InferenceAgent::new(11).decide_move(&view, grid.revealed(), 9).unwrap();
        let second = InferenceAgent::new(11).decide_move(&view, grid.revealed(), 9).unwrap();

        assert_eq!(first, second);
        assert!(first.validate(9).is_ok());
    }

    #[test]
    fn lone_unknown_neighbor_is_inferred_as_mine() {
        let mut grid = Grid::from_mine_coords(3, &[(0, 0)]).unwrap();
        grid.reveal((2, 2)).unwrap();
        let mut agent = InferenceAgent::new(0);

        let outcome = agent.decide_move(&grid.visible_view(), grid.revealed(), 3);

        assert_eq!(agent.inferred_mines(), &BTreeSet::from([(0, 0)]));
        // the only hidden cell is a known mine, so there is nothing left to pick
        assert_eq!(outcome, Err(GameError::NoCandidateMove));
    }

    #[test]
    fn pending_safe_cell_wins_over_everything() {
        let grid = Grid::from_mine_coords(3, &[(0, 0)]).unwrap();
        let revealed: BTreeSet<_> = iter_coords(3).filter(|&(row, _)| row > 0).collect();
        let mut agent = InferenceAgent::with_source(Scripted(vec![1]));

        let chosen = agent
            .decide_move(&view_of(&grid, &revealed), &revealed, 3)
            .unwrap();

        assert_eq!(agent.inferred_safe(), &BTreeSet::from([(0, 1), (0, 2)]));
        assert_eq!(chosen, Move::new(0, 2));
    }

    #[test]
    fn fallback_guesses_next_to_the_safest_clue() {
        // M 1 0 0
        // 1 1 0 0
        // 0 0 1 1
        // 0 0 1 M
        let grid = Grid::from_mine_coords(4, &[(0, 0), (3, 3)]).unwrap();
        let revealed = BTreeSet::from([(1, 1), (2, 2)]);
        let mut agent = InferenceAgent {
            knowledge: Knowledge::seeded(&[], &[(1, 1)]),
            source: Scripted(vec![2]),
        };

        let chosen = agent
            .decide_move(&view_of(&grid, &revealed), &revealed, 4)
            .unwrap();

        // both clues sit at 1/7, the earlier one in row-major order is used
        assert_eq!(chosen, Move::new(0, 2));
        assert_eq!(agent.knowledge(), &Knowledge::seeded(&[], &[(1, 1)]));
    }

    #[test]
    fn fallback_without_clues_reports_no_candidate() {
        // every clue's hidden neighbor is the known mine, nothing is left to guess on
        let grid = Grid::from_mine_coords(3, &[(0, 0)]).unwrap();
        let revealed: BTreeSet<_> = iter_coords(3).filter(|&pos| pos != (0, 0)).collect();
        let mut agent = InferenceAgent {
            knowledge: Knowledge::seeded(&[(0, 0)], &[(2, 2)]),
            source: Scripted(vec![]),
        };

        assert_eq!(
            agent.decide_move(&view_of(&grid, &revealed), &revealed, 3),
            Err(GameError::NoCandidateMove)
        );
    }

    #[test]
    fn knowledge_only_grows_during_play() {
        for seed in 0..16 {
            let mut grid = Grid::generate(GridConfig::new(8, 10).unwrap(), seed).unwrap();
            let mut agent = InferenceAgent::new(seed);

            while !grid.is_won() {
                let before = agent.knowledge().clone();
                let pending = before.pending_safe(grid.revealed());
                let Ok(chosen) = agent.decide_move(&grid.visible_view(), grid.revealed(), 8) else {
                    break;
                };
                let coords = chosen.validate(8).unwrap();

                assert!(agent.inferred_mines().is_superset(before.mines()));
                assert!(agent.inferred_safe().is_superset(before.safe()));
                assert!(!grid.is_revealed(coords));
                if !pending.is_empty() {
                    assert!(agent.inferred_safe().contains(&coords));
                }
                if agent.inferred_safe().contains(&coords) {
                    assert!(!agent.inferred_mines().contains(&coords));
                }
                if grid.reveal(coords).unwrap().is_hit() {
                    break;
                }
            }

            // every deduction is sound against the hidden layout
            for &pos in agent.inferred_mines() {
                assert!(grid.label_at(pos).is_mine(), "seed {seed}: {pos:?}");
            }
            for &pos in agent.inferred_safe() {
                assert!(!grid.label_at(pos).is_mine(), "seed {seed}: {pos:?}");
            }
        }
    }

    #[test]
    fn rejects_mismatched_dimension() {
        let grid = Grid::from_mine_coords(3, &[(0, 0)]).unwrap();
        let mut agent = InferenceAgent::new(0);

        assert_eq!(
            agent.decide_move(&grid.visible_view(), grid.revealed(), 4),
            Err(GameError::InvalidViewShape)
        );
    }
}
