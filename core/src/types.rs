use ndarray::Array2;

/// Single coordinate axis, used for the grid dimension and for row/column positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn square(dimension: Coord) -> CellCount {
    let side = dimension as CellCount;
    side.saturating_mul(side)
}

/// Row-major coordinates of a flat index on a square grid.
pub const fn from_flat_index(index: CellCount, dimension: Coord) -> Coord2 {
    let side = dimension as CellCount;
    ((index / side) as Coord, (index % side) as Coord)
}

/// Iterates every coordinate of a `dimension × dimension` grid in row-major order.
pub fn iter_coords(dimension: Coord) -> impl Iterator<Item = Coord2> {
    (0..dimension).flat_map(move |row| (0..dimension).map(move |col| (row, col)))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let bounds = (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, bounds)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Clamped 8-neighborhood of a cell, in row-major order.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }

    pub fn square(center: Coord2, dimension: Coord) -> Self {
        Self::new(center, (dimension, dimension))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighbors_are_clamped_at_edges() {
        assert_eq!(NeighborIter::square((0, 0), 5).count(), 3);
        assert_eq!(NeighborIter::square((0, 2), 5).count(), 5);
        assert_eq!(NeighborIter::square((2, 2), 5).count(), 8);
        assert_eq!(NeighborIter::square((4, 4), 5).count(), 3);
        assert_eq!(NeighborIter::square((0, 0), 1).count(), 0);
    }

    #[test]
    fn neighbors_come_in_row_major_order() {
        let neighbors: Vec<_> = NeighborIter::square((1, 1), 3).collect();
        assert_eq!(
            neighbors,
            [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn flat_index_is_row_major() {
        assert_eq!(from_flat_index(0, 4), (0, 0));
        assert_eq!(from_flat_index(5, 4), (1, 1));
        assert_eq!(from_flat_index(15, 4), (3, 3));
        assert_eq!(iter_coords(3).nth(4), Some((1, 1)));
    }
}
