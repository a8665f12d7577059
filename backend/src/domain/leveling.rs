//! XP-to-level step function.
//!
//! Levels start at 1. Advancing out of level 1 costs 500 XP; each later
//! level L costs `250 + L * 250` XP on top of everything spent before it,
//! so the boundaries fall at 500, 1250, 2250, 3500, ... total XP. The level
//! is always derived from the XP total; it is never stored or mutated
//! independently.

/// XP required to advance out of level 1.
const FIRST_LEVEL_COST: i64 = 500;

/// Base and per-level slope of the advancement cost arithmetic sequence.
const LEVEL_COST_BASE: i64 = 250;
const LEVEL_COST_STEP: i64 = 250;

/// Derive the level for an XP total.
///
/// Negative totals cannot arise (awards are positive and additive) but are
/// clamped to level 1 rather than looping.
#[must_use]
pub fn level_for_xp(total_xp: i64) -> i32 {
    let mut level = 1;
    let mut cost = FIRST_LEVEL_COST;
    let mut remaining = total_xp;
    while remaining >= cost {
        remaining -= cost;
        level += 1;
        cost = xp_for_next_level(level);
    }
    level
}

/// XP needed to advance from `level` to the next one.
#[must_use]
pub fn xp_for_next_level(level: i32) -> i64 {
    LEVEL_COST_BASE + i64::from(level) * LEVEL_COST_STEP
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1)]
    #[case(499, 1)]
    #[case(500, 2)]
    #[case(1249, 2)]
    #[case(1250, 3)]
    #[case(2249, 3)]
    #[case(2250, 4)]
    fn level_boundaries(#[case] total_xp: i64, #[case] expected: i32) {
        assert_eq!(level_for_xp(total_xp), expected);
    }

    #[test]
    fn negative_totals_clamp_to_level_one() {
        assert_eq!(level_for_xp(-50), 1);
    }

    #[rstest]
    #[case(1, 500)]
    #[case(2, 750)]
    #[case(3, 1000)]
    #[case(4, 1250)]
    fn advancement_costs(#[case] level: i32, #[case] expected: i64) {
        assert_eq!(xp_for_next_level(level), expected);
    }

    #[test]
    fn level_is_monotone_in_xp() {
        let mut previous = level_for_xp(0);
        for xp in (0..10_000).step_by(83) {
            let next = level_for_xp(xp);
            assert!(next >= previous);
            previous = next;
        }
    }
}
