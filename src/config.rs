//! Simulation and presentation settings.
//!
//! Every tunable lives in [`Config`]; the command line only overrides the
//! defaults defined here.

use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{Grid, GridError, Stamp};

pub const DEFAULT_ROWS: usize = 50;
pub const DEFAULT_COLS: usize = 50;
/// Roughly one cell in six starts alive
pub const DEFAULT_DENSITY: f64 = 1.0 / 6.0;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);
/// Generations to run when no interactive front end drives the grid
pub const DEFAULT_HEADLESS_GENERATIONS: u64 = 100;

/// How the grid is seeded before any stamps are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    #[default]
    Random,
    Empty,
}
impl FillMode {
    pub fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub fill: FillMode,
    /// Probability of a cell starting alive under [`FillMode::Random`]
    pub density: f64,
    /// Seed for the random source; `None` draws from the thread RNG
    pub seed: Option<u64>,
    /// Patterns stamped after filling, in order
    pub stamps: Vec<Stamp>,
    /// Delay between generations while the simulation is playing
    pub delay: Duration,
    /// `None` runs until interrupted
    pub generations: Option<u64>,
    /// Compute generations with rayon
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            fill: FillMode::default(),
            density: DEFAULT_DENSITY,
            seed: None,
            stamps: Vec::new(),
            delay: DEFAULT_DELAY,
            generations: None,
            parallel: false,
        }
    }
}

impl Config {
    /// The random source for seeding: reproducible when `seed` is set
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Builds the starting grid: filled per [`FillMode`], then stamped
    ///
    /// Fails on the first stamp that does not fit; stamps before it have
    /// already been applied to the (discarded) grid.
    ///
    /// # Panics
    /// If `rows` or `cols` is zero
    pub fn build_grid<R: Rng>(&self, rng: &mut R) -> Result<Grid, GridError> {
        let mut grid = Grid::new(self.rows, self.cols);
        match self.fill {
            FillMode::Random => grid.randomize(self.density, rng),
            FillMode::Empty => {}
        }
        for stamp in &self.stamps {
            let origin = stamp.origin.unwrap_or_else(|| grid.center());
            grid.stamp(stamp.pattern.offsets(), origin)?;
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, Pattern};

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!((config.rows, config.cols), (50, 50));
        assert_eq!(config.delay, Duration::from_millis(500));
        assert!((config.density - 0.1667).abs() < 1e-3);
        assert_eq!(config.fill, FillMode::Random);
        assert!(config.stamps.is_empty());
    }

    #[test]
    fn fill_mode_parses() {
        assert_eq!(FillMode::new("empty"), Some(FillMode::Empty));
        assert_eq!(FillMode::new("random"), Some(FillMode::Random));
        assert_eq!(FillMode::new("alternating"), None);
    }

    #[test]
    fn empty_grid_with_centered_stamp() {
        let config = Config {
            fill: FillMode::Empty,
            stamps: vec![Stamp {
                pattern: Pattern::PENTADECATHLON,
                origin: None,
            }],
            ..Config::default()
        };

        let grid = config.build_grid(&mut config.rng()).unwrap();

        assert_eq!(grid.alive_count(), 22);
        assert_eq!(grid.alive().next(), Some(Coord::new(25, 25)));
    }

    #[test]
    fn seeded_grids_match() {
        let config = Config {
            seed: Some(9),
            ..Config::default()
        };

        let a = config.build_grid(&mut config.rng()).unwrap();
        let b = config.build_grid(&mut config.rng()).unwrap();

        assert!(a.alive().eq(b.alive()));
    }

    #[test]
    fn stamp_outside_grid_fails() {
        let config = Config {
            rows: 10,
            cols: 10,
            fill: FillMode::Empty,
            stamps: vec![Stamp {
                pattern: Pattern::PENTADECATHLON,
                origin: Some(Coord::zero()),
            }],
            ..Config::default()
        };

        assert!(matches!(
            config.build_grid(&mut config.rng()),
            Err(GridError::OutOfRange { .. })
        ));
    }
}
