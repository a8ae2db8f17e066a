use thiserror::Error;

use crate::Coord;

/// Errors raised by coordinate-addressed grid operations
///
/// A failed operation never leaves the grid partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell {coord} is outside the {rows}x{cols} grid")]
    OutOfRange {
        coord: Coord,
        rows: usize,
        cols: usize,
    },
}

/// Errors raised while reading a pattern from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unknown pattern `{0}`")]
    UnknownPattern(String),
    #[error("malformed stamp `{0}`, expected NAME or NAME@ROW,COL")]
    MalformedStamp(String),
    #[error("run-length pattern has no cells")]
    Empty,
    #[error("run count `{0}` is too large")]
    RunTooLarge(String),
    #[error("run-length pattern has more than {0} live cells")]
    TooManyCells(usize),
}
