use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Neg, Sub},
};

/// A signed (row, column) pair
///
/// Signed because the same type carries pattern offsets, scroll deltas and
/// coordinates that have not been wrapped onto the torus yet, all of which
/// can sit left of or above the grid. The grid decides what is in range.
///
/// The operators use plain `i32` arithmetic. Anything adding offsets that
/// come from user input goes through [`Coord::checked_add`] or wraps in a
/// wider type instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}
impl Coord {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
    #[inline]
    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }
    #[inline]
    pub const fn one() -> Self {
        Self { row: 1, col: 1 }
    }

    /// `self + rhs`, or `None` if either component overflows
    #[inline]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match (self.row.checked_add(rhs.row), self.col.checked_add(rhs.col)) {
            (Some(row), Some(col)) => Some(Self { row, col }),
            _ => None,
        }
    }
}
impl PartialOrd for Coord {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Coord {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // row-major: rows first, then columns within a row
        Ord::cmp(&self.row, &other.row).then(Ord::cmp(&self.col, &other.col))
    }
}
impl Neg for Coord {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            row: -self.row,
            col: -self.col,
        }
    }
}
impl Add for Coord {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            row: self.row + rhs.row,
            col: self.col + rhs.col,
        }
    }
}
impl Sub for Coord {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            row: self.row - rhs.row,
            col: self.col - rhs.col,
        }
    }
}
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_row_major() {
        let mut coords = vec![Coord::new(1, 0), Coord::new(0, 5), Coord::new(0, 1)];
        coords.sort();

        assert_eq!(
            coords,
            vec![Coord::new(0, 1), Coord::new(0, 5), Coord::new(1, 0)]
        );
    }

    #[test]
    fn arithmetic() {
        let a = Coord::new(3, -2);

        assert_eq!(a + Coord::one(), Coord::new(4, -1));
        assert_eq!(a - a, Coord::zero());
        assert_eq!(-a, Coord::new(-3, 2));
    }

    #[test]
    fn checked_add_reports_overflow() {
        let edge = Coord::new(i32::MAX - 1, 0);

        assert_eq!(edge.checked_add(Coord::one()), Some(Coord::new(i32::MAX, 1)));
        assert_eq!(edge.checked_add(Coord::new(2, 0)), None);
        assert_eq!(Coord::new(0, i32::MIN).checked_add(Coord::new(0, -1)), None);
    }
}
