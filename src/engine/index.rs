use std::sync::OnceLock;

/// Number of possible live-neighbor counts, 0 through 8 inclusive
const NEIGHBOR_COUNTS: usize = 9;
type RuleTable = [[bool; NEIGHBOR_COUNTS]; 2];

/// Returns a Singleton lookup table for the Game of Life ruleset
///
/// Equivalent to calling [`generate_rule_table`] once and storing the result
fn get_rule_table() -> &'static RuleTable {
    static CELL: OnceLock<RuleTable> = OnceLock::new();
    CELL.get_or_init(generate_rule_table)
}

/// Creates a lookup table for the B3/S23 ruleset
///
/// The outer index is the current state of the cell (`0` dead, `1` alive) and
/// the inner index its live-neighbor count.
fn generate_rule_table() -> RuleTable {
    let mut table = [[false; NEIGHBOR_COUNTS]; 2];
    for (state, row) in table.iter_mut().enumerate() {
        let alive = state == 1;
        for (neighbors, next) in row.iter_mut().enumerate() {
            *next = match (alive, neighbors) {
                // survival
                (true, 2 | 3) => true,
                // reproduction
                (false, 3) => true,
                // underpopulation, overpopulation, or stays dead
                _ => false,
            };
        }
    }
    table
}

/// Next state of a cell given its current state and live-neighbor count
#[inline]
pub(super) fn next_state(alive: bool, neighbors: u8) -> bool {
    debug_assert!(
        (neighbors as usize) < NEIGHBOR_COUNTS,
        "a cell has at most 8 neighbors"
    );
    get_rule_table()[alive as usize][neighbors as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_match_conway_life() {
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(next_state(false, 3));

        assert!(!next_state(true, 0));
        assert!(!next_state(true, 1));
        assert!(!next_state(true, 4));
        assert!(!next_state(true, 8));
        assert!(!next_state(false, 2));
        assert!(!next_state(false, 4));
        assert!(!next_state(false, 0));
    }

    #[test]
    fn only_three_cells_are_born() {
        let table = generate_rule_table();
        let births: Vec<usize> = (0..NEIGHBOR_COUNTS).filter(|&n| table[0][n]).collect();

        assert_eq!(births, vec![3]);
    }
}
