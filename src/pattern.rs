use std::{borrow::Cow, str::FromStr, sync::OnceLock};

use regex::Regex;

use crate::{Coord, PatternError};

/// Upper bound on the live cells a run-length pattern may decode to
pub const MAX_PATTERN_CELLS: usize = 1 << 20;

const GLIDER_OFFSETS: [Coord; 5] = [
    Coord::new(0, 0),
    Coord::new(1, 1),
    Coord::new(1, 2),
    Coord::new(2, 0),
    Coord::new(2, 1),
];

const PENTADECATHLON_OFFSETS: [Coord; 22] = [
    Coord::new(0, 0),
    Coord::new(0, 1),
    Coord::new(0, 2),
    Coord::new(1, 1),
    Coord::new(2, 1),
    Coord::new(3, 0),
    Coord::new(3, 1),
    Coord::new(3, 2),
    Coord::new(5, 0),
    Coord::new(5, 1),
    Coord::new(5, 2),
    Coord::new(6, 0),
    Coord::new(6, 1),
    Coord::new(6, 2),
    Coord::new(8, 0),
    Coord::new(8, 1),
    Coord::new(8, 2),
    Coord::new(9, 1),
    Coord::new(10, 1),
    Coord::new(11, 0),
    Coord::new(11, 1),
    Coord::new(11, 2),
];

/// A named set of cell offsets, relative to the origin it is stamped at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: Cow<'static, str>,
    offsets: Cow<'static, [Coord]>,
}

impl Pattern {
    /// Diagonal spaceship with period 4
    pub const GLIDER: Self = Self {
        name: Cow::Borrowed("glider"),
        offsets: Cow::Borrowed(&GLIDER_OFFSETS),
    };
    /// Oscillator with period 15
    pub const PENTADECATHLON: Self = Self {
        name: Cow::Borrowed("pentadecathlon"),
        offsets: Cow::Borrowed(&PENTADECATHLON_OFFSETS),
    };

    pub const BUILTIN: [Self; 2] = [Self::GLIDER, Self::PENTADECATHLON];

    pub fn new<N: Into<String>>(name: N, offsets: Vec<Coord>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            offsets: Cow::Owned(offsets),
        }
    }

    /// Looks up a built-in pattern by (case-insensitive) name
    pub fn builtin(name: &str) -> Option<Self> {
        Self::BUILTIN
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[inline]
    pub fn offsets(&self) -> &[Coord] {
        &self.offsets
    }

    /// Reads a pattern from Life run-length-encoded text
    ///
    /// `#` starts a comment (`#N` names the pattern), a line starting with
    /// `x` is the size header, and the body is made of runs of `b` (dead),
    /// `o` (alive) and `$` (end of row), terminated by `!`. Runs that push
    /// the cursor past `i32` or the pattern past [`MAX_PATTERN_CELLS`] live
    /// cells are rejected before anything is allocated for them.
    pub fn from_rle(value: &str) -> Result<Self, PatternError> {
        static RUN: OnceLock<Regex> = OnceLock::new();
        let re = RUN.get_or_init(|| Regex::new(r"(\d*)([bo$!])").expect("valid run regex"));

        let mut name = None;
        let mut offsets = Vec::new();
        let mut cursor = Coord::zero();
        'lines_loop: for mut line in value.lines() {
            if let Some(i) = line.find('#') {
                if let Some(n) = line[i..].strip_prefix("#N") {
                    name = Some(n.trim().to_owned());
                }
                line = &line[..i];
            }
            if line.trim_start().starts_with('x') {
                continue;
            }

            for (_, [run_str, state]) in re.captures_iter(line).map(|x| x.extract()) {
                let run = match run_str {
                    "" => 1,
                    s => s
                        .parse::<i32>()
                        .map_err(|_| PatternError::RunTooLarge(s.to_owned()))?,
                };
                let too_large = || PatternError::RunTooLarge(run_str.to_owned());
                match state {
                    "!" => break 'lines_loop,
                    "o" => {
                        if offsets.len() + run as usize > MAX_PATTERN_CELLS {
                            return Err(PatternError::TooManyCells(MAX_PATTERN_CELLS));
                        }
                        let end = cursor.col.checked_add(run).ok_or_else(too_large)?;
                        offsets.extend((cursor.col..end).map(|col| Coord::new(cursor.row, col)));
                        cursor.col = end;
                    }
                    "b" => cursor.col = cursor.col.checked_add(run).ok_or_else(too_large)?,
                    "$" => {
                        cursor.col = 0;
                        cursor.row = cursor.row.checked_add(run).ok_or_else(too_large)?;
                    }
                    _ => unreachable!(),
                }
            }
        }

        if offsets.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(Self::new(name.unwrap_or_else(|| "custom".to_owned()), offsets))
    }
}

/// A pattern together with where to stamp it
///
/// Parsed from `NAME` or `NAME@ROW,COL`; without an origin the pattern goes
/// to the center of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub pattern: Pattern,
    pub origin: Option<Coord>,
}

impl FromStr for Stamp {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static STAMP: OnceLock<Regex> = OnceLock::new();
        let re = STAMP.get_or_init(|| {
            Regex::new(r"^\s*([A-Za-z][\w-]*)\s*(?:@\s*(-?\d+)\s*,\s*(-?\d+))?\s*$")
                .expect("valid stamp regex")
        });

        let caps = re
            .captures(s)
            .ok_or_else(|| PatternError::MalformedStamp(s.to_owned()))?;
        let name = &caps[1];
        let pattern =
            Pattern::builtin(name).ok_or_else(|| PatternError::UnknownPattern(name.to_owned()))?;

        let origin = match (caps.get(2), caps.get(3)) {
            (Some(row), Some(col)) => {
                let parse = |m: regex::Match<'_>| {
                    m.as_str()
                        .parse::<i32>()
                        .map_err(|_| PatternError::MalformedStamp(s.to_owned()))
                };
                Some(Coord::new(parse(row)?, parse(col)?))
            }
            _ => None,
        };
        Ok(Self { pattern, origin })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup_ignores_case() {
        assert_eq!(Pattern::builtin("Glider"), Some(Pattern::GLIDER));
        assert_eq!(
            Pattern::builtin("PENTADECATHLON"),
            Some(Pattern::PENTADECATHLON)
        );
        assert_eq!(Pattern::builtin("gosper"), None);
    }

    #[test]
    fn builtin_sizes() {
        assert_eq!(Pattern::GLIDER.offsets().len(), 5);
        assert_eq!(Pattern::PENTADECATHLON.offsets().len(), 22);
    }

    #[test]
    fn parse_stamp_without_origin() {
        let stamp: Stamp = "pentadecathlon".parse().unwrap();

        assert_eq!(stamp.pattern, Pattern::PENTADECATHLON);
        assert_eq!(stamp.origin, None);
    }

    #[test]
    fn parse_stamp_with_origin() {
        let stamp: Stamp = "glider@5, 12".parse().unwrap();

        assert_eq!(stamp.pattern, Pattern::GLIDER);
        assert_eq!(stamp.origin, Some(Coord::new(5, 12)));
    }

    #[test]
    fn parse_stamp_errors() {
        assert_eq!(
            "blinker".parse::<Stamp>(),
            Err(PatternError::UnknownPattern("blinker".to_owned()))
        );
        assert_eq!(
            "glider@5".parse::<Stamp>(),
            Err(PatternError::MalformedStamp("glider@5".to_owned()))
        );
        assert!("glider@99999999999,0".parse::<Stamp>().is_err());
    }

    #[test]
    fn rle_glider_matches_builtin() {
        let rle = "#N Glider\n#C facing south-east\nx = 3, y = 3, rule = B3/S23\no$b2o$2o!\n";
        let pattern = Pattern::from_rle(rle).unwrap();

        assert_eq!(pattern.name(), "Glider");
        assert_eq!(pattern.offsets(), Pattern::GLIDER.offsets());
    }

    #[test]
    fn rle_multiline_and_blank_rows() {
        let pattern = Pattern::from_rle("3o\n2$\nbo!").unwrap();

        assert_eq!(pattern.name(), "custom");
        assert_eq!(
            pattern.offsets(),
            &[
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(0, 2),
                Coord::new(2, 1),
            ]
        );
    }

    #[test]
    fn rle_stops_at_bang() {
        let pattern = Pattern::from_rle("o!\n3o").unwrap();

        assert_eq!(pattern.offsets(), &[Coord::zero()]);
    }

    #[test]
    fn rle_errors() {
        assert_eq!(Pattern::from_rle("#C nothing\n3b!"), Err(PatternError::Empty));
        assert_eq!(
            Pattern::from_rle("99999999999o!"),
            Err(PatternError::RunTooLarge("99999999999".to_owned()))
        );
    }

    #[test]
    fn rle_cursor_overflow_is_an_error() {
        assert_eq!(
            Pattern::from_rle("2147483647b2147483647bo!"),
            Err(PatternError::RunTooLarge("2147483647".to_owned()))
        );
        assert_eq!(
            Pattern::from_rle("o2147483647$2147483647$o!"),
            Err(PatternError::RunTooLarge("2147483647".to_owned()))
        );
        assert_eq!(
            Pattern::from_rle("5b2147483647o!"),
            Err(PatternError::TooManyCells(MAX_PATTERN_CELLS))
        );
    }

    #[test]
    fn rle_cell_count_is_capped() {
        assert_eq!(
            Pattern::from_rle("2000000000o!"),
            Err(PatternError::TooManyCells(MAX_PATTERN_CELLS))
        );

        let at_limit = format!("{MAX_PATTERN_CELLS}o!");
        assert_eq!(Pattern::from_rle(&at_limit).unwrap().offsets().len(), MAX_PATTERN_CELLS);

        let past_limit = format!("o$o$o$o${}o!", MAX_PATTERN_CELLS - 3);
        assert_eq!(
            Pattern::from_rle(&past_limit),
            Err(PatternError::TooManyCells(MAX_PATTERN_CELLS))
        );
    }
}
