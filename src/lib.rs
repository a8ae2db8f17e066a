//! Conway's Game of Life on a fixed-size toroidal grid.

pub mod config;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod pos;
pub mod ticker;
pub mod viewport;

pub use config::{Config, FillMode};
pub use engine::{Grid, GridWindow};
pub use error::{GridError, PatternError};
pub use pattern::{Pattern, Stamp};
pub use pos::Coord;
pub use ticker::{SharedGrid, Ticker};
pub use viewport::Viewport;
