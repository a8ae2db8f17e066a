use super::Grid;
use crate::Coord;

/// A rectangular view over a [`Grid`]
///
/// The view may be larger than the grid or start anywhere; coordinates are
/// wrapped, so scrolling past an edge shows the opposite side of the torus.
pub struct GridWindow<'a> {
    tl: Coord,
    rows: usize,
    cols: usize,
    alive_glyph: &'a str,
    dead_glyph: &'a str,
    grid: &'a Grid,
}
impl<'a> GridWindow<'a> {
    pub fn new(grid: &'a Grid, top_left: Coord, rows: usize, cols: usize) -> Self {
        Self {
            tl: top_left,
            rows,
            cols,
            alive_glyph: "█",
            dead_glyph: " ",
            grid,
        }
    }

    /// Sets the strings drawn for alive and dead cells
    pub fn glyphs(mut self, alive: &'a str, dead: &'a str) -> Self {
        self.alive_glyph = alive;
        self.dead_glyph = dead;
        self
    }

    /// Iterates over `(window offset, alive)` for every cell in the window
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Coord, bool)> + '_ {
        (0..self.rows as i32).flat_map(move |row| {
            (0..self.cols as i32).map(move |col| {
                let offset = Coord::new(row, col);
                (offset, self.grid.wrapped(self.tl, offset))
            })
        })
    }

    /// Renders one line of the window
    pub fn line(&self, row: usize) -> String {
        let glyph_len = self.alive_glyph.len().max(self.dead_glyph.len());
        let mut line = String::with_capacity(self.cols * glyph_len);
        for col in 0..self.cols as i32 {
            let offset = Coord::new(row as i32, col);
            line.push_str(if self.grid.wrapped(self.tl, offset) {
                self.alive_glyph
            } else {
                self.dead_glyph
            });
        }
        line
    }

    #[inline]
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.rows).map(|row| self.line(row))
    }
}

impl std::fmt::Display for GridWindow<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        let mut grid = Grid::new(3, 4);
        grid.set(0, 0, true).unwrap();
        grid.set(1, 2, true).unwrap();
        grid.set(2, 3, true).unwrap();
        grid
    }

    #[test]
    fn renders_whole_grid() {
        let grid = sample();
        let text = grid.window(Coord::zero(), 3, 4).glyphs("#", ".").to_string();

        assert_eq!(text, "#...\n..#.\n...#");
    }

    #[test]
    fn scrolled_window_wraps() {
        let grid = sample();
        let window = grid.window(Coord::new(-1, -1), 2, 3).glyphs("#", ".");

        assert_eq!(window.to_string(), "#..\n.#.");
    }

    #[test]
    fn iter_reports_offsets() {
        let grid = sample();
        let window = grid.window(Coord::new(1, 2), 2, 2);
        let alive: Vec<Coord> = window
            .iter()
            .filter(|&(_, alive)| alive)
            .map(|(offset, _)| offset)
            .collect();

        assert_eq!(alive, vec![Coord::new(0, 0), Coord::new(1, 1)]);
    }

    #[test]
    fn window_at_coordinate_limit_wraps() {
        let grid = sample();
        let far = grid.window(Coord::new(i32::MAX, i32::MAX), 3, 4).glyphs("#", ".");
        let near = grid
            .window(grid.wrap(Coord::new(i32::MAX, i32::MAX)), 3, 4)
            .glyphs("#", ".");

        assert_eq!(far.to_string(), near.to_string());
    }
}
