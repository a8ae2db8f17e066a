mod index;
mod torus;
mod window;

use self::torus::Torus;
pub use self::window::GridWindow;
use crate::{Coord, GridError};
use rand::Rng;
use rayon::prelude::*;

/// A fixed-size toroidal Game of Life grid
///
/// Cells are stored row-major in a front buffer; [`Grid::step`] writes the
/// next generation into a back buffer and swaps the two, so no cell ever
/// sees a neighbor's already-updated state and observers only ever see whole
/// generations.
#[derive(Debug, Clone)]
pub struct Grid {
    torus: Torus,
    cells: Vec<bool>,
    back: Vec<bool>,
    ticks: u64,
}

impl Grid {
    /// Creates a `rows` x `cols` grid with every cell dead
    ///
    /// # Panics
    /// If either dimension is zero or does not fit in an `i32`
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be non-zero");
        assert!(
            i32::try_from(rows).is_ok() && i32::try_from(cols).is_ok(),
            "grid dimensions must fit in an i32"
        );
        let torus = Torus { rows, cols };
        Self {
            torus,
            cells: vec![false; torus.len()],
            back: vec![false; torus.len()],
            ticks: 0,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.torus.rows, self.torus.cols)
    }
    #[inline]
    pub fn rows(&self) -> usize {
        self.torus.rows
    }
    #[inline]
    pub fn cols(&self) -> usize {
        self.torus.cols
    }

    /// Number of generations computed since construction
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// The center of the grid, with halves rounded up
    ///
    /// This is the default origin for stamping patterns.
    pub fn center(&self) -> Coord {
        Coord::new(
            self.torus.rows.div_ceil(2) as i32,
            self.torus.cols.div_ceil(2) as i32,
        )
    }

    /// Maps any coordinate onto the grid with toroidal wraparound
    pub fn wrap(&self, coord: Coord) -> Coord {
        let idx = self.torus.wrapped_index(coord);
        Coord::new((idx / self.torus.cols) as i32, (idx % self.torus.cols) as i32)
    }

    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        self.torus.contains(Coord::new(row, col))
    }

    fn checked_index(&self, coord: Coord) -> Result<usize, GridError> {
        self.torus.index(coord).ok_or(GridError::OutOfRange {
            coord,
            rows: self.torus.rows,
            cols: self.torus.cols,
        })
    }

    pub fn alive_at(&self, row: i32, col: i32) -> Result<bool, GridError> {
        let idx = self.checked_index(Coord::new(row, col))?;
        Ok(self.cells[idx])
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterates over the coordinates of every alive cell, in row-major order
    pub fn alive(&self) -> impl Iterator<Item = Coord> + '_ {
        let cols = self.torus.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(i, _)| Coord::new((i / cols) as i32, (i % cols) as i32))
    }

    /// Live-neighbor count of a cell, in `0..=8`
    ///
    /// Neighbors are looked up with toroidal wraparound, so the coordinate
    /// itself is wrapped too and every input is accepted.
    pub fn neighbor_count(&self, row: i32, col: i32) -> u8 {
        self.torus.neighbor_count(&self.cells, Coord::new(row, col))
    }

    /// Advances the grid by one generation
    pub fn step(&mut self) {
        let Self {
            torus, cells, back, ..
        } = self;
        let cells: &[bool] = cells;
        for (row, out) in back.chunks_mut(torus.cols).enumerate() {
            torus.next_row(cells, row, out);
        }
        self.swap_generation();
    }

    /// Advances the grid by one generation, computing rows in parallel
    ///
    /// Produces exactly the same generation as [`Grid::step`].
    pub fn step_parallel(&mut self) {
        let Self {
            torus, cells, back, ..
        } = self;
        let torus = *torus;
        let cells: &[bool] = cells;
        back.par_chunks_mut(torus.cols)
            .enumerate()
            .for_each(|(row, out)| torus.next_row(cells, row, out));
        self.swap_generation();
    }

    fn swap_generation(&mut self) {
        std::mem::swap(&mut self.cells, &mut self.back);
        self.ticks += 1;
        tracing::trace!(tick = self.ticks, "generation computed");
    }

    /// Flips a single cell
    pub fn toggle(&mut self, row: i32, col: i32) -> Result<(), GridError> {
        let idx = self.checked_index(Coord::new(row, col))?;
        self.cells[idx] = !self.cells[idx];
        Ok(())
    }

    pub fn set(&mut self, row: i32, col: i32, alive: bool) -> Result<(), GridError> {
        let idx = self.checked_index(Coord::new(row, col))?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Rewrites every cell, each alive independently with probability `density`
    ///
    /// `density` is clamped to `0.0..=1.0`; `NaN` counts as `0.0`.
    pub fn randomize<R: Rng>(&mut self, density: f64, rng: &mut R) {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        for cell in self.cells.iter_mut() {
            *cell = rng.random_bool(density);
        }
        tracing::debug!(density, alive = self.alive_count(), "grid randomized");
    }

    /// Kills every cell; the tick counter is left as is
    pub fn clear(&mut self) {
        self.cells.fill(false);
        tracing::debug!("grid cleared");
    }

    /// Sets `origin + offset` alive for every offset in `pattern`
    ///
    /// Targets are not wrapped. If any of them falls outside the grid
    /// nothing is written and the first offending coordinate is reported.
    pub fn stamp(&mut self, pattern: &[Coord], origin: Coord) -> Result<(), GridError> {
        let targets = pattern
            .iter()
            .map(|&offset| {
                // a sum past i32 is off the grid too; saturate it for the report
                let target = origin.checked_add(offset).unwrap_or(Coord::new(
                    origin.row.saturating_add(offset.row),
                    origin.col.saturating_add(offset.col),
                ));
                self.checked_index(target)
            })
            .collect::<Result<Vec<_>, _>>()?;
        for idx in targets {
            self.cells[idx] = true;
        }
        tracing::debug!(%origin, cells = pattern.len(), "pattern stamped");
        Ok(())
    }

    /// A view of `rows` x `cols` cells starting at `top_left`, wrapping around the edges
    pub fn window(&self, top_left: Coord, rows: usize, cols: usize) -> GridWindow<'_> {
        GridWindow::new(self, top_left, rows, cols)
    }

    /// State of a wrapped coordinate
    #[inline]
    pub(crate) fn wrapped(&self, coord: Coord, offset: Coord) -> bool {
        self.cells[self.torus.wrapped_offset_index(coord, offset)]
    }
}
