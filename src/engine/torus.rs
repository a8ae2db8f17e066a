use crate::Coord;

/// The eight neighbor offsets of a cell, in row-major order
pub(super) const NEIGHBOR_OFFSETS: [Coord; 8] = [
    Coord::new(-1, -1),
    Coord::new(-1, 0),
    Coord::new(-1, 1),
    Coord::new(0, -1),
    Coord::new(0, 1),
    Coord::new(1, -1),
    Coord::new(1, 0),
    Coord::new(1, 1),
];

/// Addressing scheme for a row-major buffer of `rows * cols` cells
///
/// Opposite edges are adjacent, so every cell (edges and corners included)
/// has exactly eight neighbors. Wrapped lookups can never go out of range;
/// only [`Torus::index`] rejects coordinates, and it never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Torus {
    pub(super) rows: usize,
    pub(super) cols: usize,
}

impl Torus {
    #[inline]
    pub(super) fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub(super) fn contains(&self, coord: Coord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.rows
            && (coord.col as usize) < self.cols
    }

    /// Buffer index of an in-range coordinate, without wraparound
    #[inline]
    pub(super) fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.row as usize * self.cols + coord.col as usize)
    }

    /// Buffer index of any coordinate, wrapped with Euclidean modulo
    #[inline]
    pub(super) fn wrapped_index(&self, coord: Coord) -> usize {
        self.wrapped_offset_index(coord, Coord::zero())
    }

    /// Buffer index of `coord + offset`, wrapped
    ///
    /// The sum is taken in `i64`, so it cannot overflow for any pair of
    /// `i32` coordinates.
    #[inline]
    pub(super) fn wrapped_offset_index(&self, coord: Coord, offset: Coord) -> usize {
        let row = (i64::from(coord.row) + i64::from(offset.row)).rem_euclid(self.rows as i64);
        let col = (i64::from(coord.col) + i64::from(offset.col)).rem_euclid(self.cols as i64);
        row as usize * self.cols + col as usize
    }

    /// Counts the alive cells among the eight wrapped neighbors of `coord`
    pub(super) fn neighbor_count(&self, cells: &[bool], coord: Coord) -> u8 {
        debug_assert_eq!(cells.len(), self.len());
        let count = NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&offset| cells[self.wrapped_offset_index(coord, offset)])
            .count();
        // at most one per offset
        debug_assert!(count <= NEIGHBOR_OFFSETS.len());
        count as u8
    }

    /// Writes the next generation of a single row into `out`
    ///
    /// Reads only from `cells`, so any number of rows can be computed from
    /// the same generation without observing each other's output.
    pub(super) fn next_row(&self, cells: &[bool], row: usize, out: &mut [bool]) {
        debug_assert_eq!(out.len(), self.cols);
        let start = row * self.cols;
        for (col, next) in out.iter_mut().enumerate() {
            let coord = Coord::new(row as i32, col as i32);
            let neighbors = self.neighbor_count(cells, coord);
            *next = super::index::next_state(cells[start + col], neighbors);
        }
    }
}
