use crate::{Coord, Grid, GridError};

/// Maps surface coordinates (pixels, terminal cells) onto grid cells
///
/// Every cell is drawn as a `cell_width` x `cell_height` block, the grid's
/// top-left corner sits at (`offset_left`, `offset_top`) on the surface, and
/// `scroll` is the grid coordinate drawn in that corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cell_width: u32,
    pub cell_height: u32,
    pub offset_left: i32,
    pub offset_top: i32,
    pub scroll: Coord,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            cell_width: 15,
            cell_height: 15,
            offset_left: 10,
            offset_top: 10,
            scroll: Coord::zero(),
        }
    }
}

impl Viewport {
    /// A viewport with square cells of `cell_size`
    pub fn square(cell_size: u32, offset_left: i32, offset_top: i32) -> Self {
        Self {
            cell_width: cell_size,
            cell_height: cell_size,
            offset_left,
            offset_top,
            scroll: Coord::zero(),
        }
    }

    /// Grid coordinate under a surface point, rounding towards negative infinity
    ///
    /// The result is not range-checked or wrapped; points left of or above
    /// the grid give negative coordinates.
    pub fn cell_at(&self, x: i32, y: i32) -> Coord {
        let row = (y - self.offset_top).div_euclid(self.cell_height.max(1) as i32);
        let col = (x - self.offset_left).div_euclid(self.cell_width.max(1) as i32);
        self.scroll + Coord::new(row, col)
    }

    /// Toggles the cell under a surface point, returning its coordinate
    pub fn toggle_at(&self, grid: &mut Grid, x: i32, y: i32) -> Result<Coord, GridError> {
        let cell = self.cell_at(x, y);
        grid.toggle(cell.row, cell.col)?;
        Ok(cell)
    }

    /// How many whole cells fit in a `width` x `height` surface
    pub fn visible_cells(&self, width: u32, height: u32) -> (usize, usize) {
        let rows = (height as i32 - self.offset_top).max(0) as u32 / self.cell_height.max(1);
        let cols = (width as i32 - self.offset_left).max(0) as u32 / self.cell_width.max(1);
        (rows as usize, cols as usize)
    }
}
