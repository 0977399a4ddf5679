use super::*;

/// Uniform placement: draws flat indices and redraws whenever the drawn cell already holds a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GridConfig) -> MineLayout {
        use rand::prelude::*;

        let total_cells = config.total_cells();
        let mut layout = MineLayout::empty(config.dimension);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut redraws = 0usize;

        while layout.mine_count() < config.mines {
            let index: CellCount = rng.random_range(0..total_cells);
            if !layout.place_mine(from_flat_index(index, config.dimension)) {
                redraws += 1;
            }
        }

        log::debug!(
            "placed {} mines on {}x{} grid ({} redraws)",
            config.mines,
            config.dimension,
            config.dimension,
            redraws
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dimension: Coord, mines: CellCount) -> GridConfig {
        GridConfig::new(dimension, mines).unwrap()
    }

    #[test]
    fn places_exact_mine_count() {
        for seed in 0..20 {
            let layout = RandomMineGenerator::new(seed).generate(config(9, 10));
            let counted = iter_coords(9).filter(|&pos| layout.contains_mine(pos)).count();
            assert_eq!(layout.mine_count(), 10);
            assert_eq!(counted, 10);
        }
    }

    #[test]
    fn fills_all_but_one_cell() {
        let layout = RandomMineGenerator::new(7).generate(config(4, 15));
        let safe: alloc::vec::Vec<_> = iter_coords(4)
            .filter(|&pos| !layout.contains_mine(pos))
            .collect();
        assert_eq!(safe.len(), 1);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let first = RandomMineGenerator::new(42).generate(config(16, 40));
        let second = RandomMineGenerator::new(42).generate(config(16, 40));
        assert_eq!(first, second);
    }
}
