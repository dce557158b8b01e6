//! Scoring module - line clears, T-spins, combos and back-to-back
//!
//! Rules:
//! - Line clears score 100/300/500/800 for 1-4 rows (100 per row beyond
//!   four), times `level + 1`.
//! - A Full T-spin clear replaces that base with 800/1200/1600 times `level + 1`.
//! - Back-to-back applies a 3/2 multiplier (rounded half up) to the base
//!   clear points, before the combo bonus.
//! - Combo bonus is `50 * (combo - 1)`: the first clear of a chain earns none.
//! - Drop points are awarded per row at move time, outside this formula.

use crate::types::{
    TSpinKind, B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, HARD_DROP_POINTS, LINE_SCORES,
    LINE_SCORE_PER_EXTRA_LINE, SOFT_DROP_POINTS, TSPIN_SCORES,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Base points for the clear (includes B2B multiplier, excludes combo bonus).
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`.
    pub combo_bonus: u32,
    pub total: u32,
    pub qualifies_for_b2b: bool,
    /// Whether a B2B multiplier was applied to this clear.
    pub b2b_applied: bool,
}

/// Calculate line clear score
/// lines: number of lines cleared
/// level: current level (starts at 1)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    let base_score = match lines {
        0 => return 0,
        1..=4 => LINE_SCORES[lines],
        _ => LINE_SCORE_PER_EXTRA_LINE.saturating_mul(lines as u32),
    };
    base_score.saturating_mul(level.saturating_add(1))
}

/// Full T-spin clear score, or `None` when the T-spin table does not apply
pub fn calculate_tspin_score(tspin: TSpinKind, lines: usize, level: u32) -> Option<u32> {
    match (tspin, lines) {
        (TSpinKind::Full, 1..=3) => {
            Some(TSPIN_SCORES[lines].saturating_mul(level.saturating_add(1)))
        }
        _ => None,
    }
}

/// Calculate combo bonus.
///
/// `combo` counts consecutive clearing locks including this one; `0` and `1`
/// earn nothing.
pub fn calculate_combo_bonus(combo: u32) -> u32 {
    COMBO_BASE.saturating_mul(combo.saturating_sub(1))
}

/// Check if this clear qualifies for back-to-back
/// B2B applies to: T-spin full with any lines, or exactly 4 lines
pub fn qualifies_for_b2b(tspin: TSpinKind, lines: usize) -> bool {
    lines == 4 || (tspin == TSpinKind::Full && lines > 0)
}

/// Apply the B2B multiplier (3/2, rounded half up) to a point value.
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    points
        .saturating_mul(B2B_NUMERATOR)
        .saturating_add(B2B_DENOMINATOR / 2)
        / B2B_DENOMINATOR
}

/// Calculate complete score for a clearing lock.
///
/// `previous_b2b` is the back-to-back flag before this clear; callers store
/// `qualifies_for_b2b` as the new flag.
pub fn calculate_score(
    lines: usize,
    level: u32,
    tspin: TSpinKind,
    combo: u32,
    previous_b2b: bool,
) -> ScoreResult {
    if lines == 0 {
        return ScoreResult::default();
    }

    let qualifies_b2b = qualifies_for_b2b(tspin, lines);

    let base_points = calculate_tspin_score(tspin, lines, level)
        .unwrap_or_else(|| calculate_line_score(lines, level));

    let b2b_applied = qualifies_b2b && previous_b2b;
    let line_clear_score = if b2b_applied {
        apply_b2b_multiplier(base_points)
    } else {
        base_points
    };

    let combo_bonus = calculate_combo_bonus(combo);
    let total = line_clear_score.saturating_add(combo_bonus);

    ScoreResult {
        line_clear_score,
        combo_bonus,
        total,
        qualifies_for_b2b: qualifies_b2b,
        b2b_applied,
    }
}

/// Points for moving `cells` rows by soft or hard drop
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    cells.saturating_mul(per_cell)
}

/// Level for a cumulative line count: `1 + lines / 10`
pub fn level_for_lines(lines: u32) -> u32 {
    1 + lines / 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_at_level_one() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 200);
        assert_eq!(calculate_line_score(2, 1), 600);
        assert_eq!(calculate_line_score(3, 1), 1000);
        assert_eq!(calculate_line_score(4, 1), 1600);
    }

    #[test]
    fn test_line_score_fallback_above_four() {
        assert_eq!(calculate_line_score(5, 0), 500);
        assert_eq!(calculate_line_score(6, 2), 1800);
    }

    #[test]
    fn test_tspin_overrides_base() {
        let r = calculate_score(2, 1, TSpinKind::Full, 1, false);
        assert_eq!(r.line_clear_score, 2400);
        assert!(r.qualifies_for_b2b);
        assert!(!r.b2b_applied);
    }

    #[test]
    fn test_mini_uses_line_table() {
        let r = calculate_score(1, 1, TSpinKind::Mini, 1, true);
        assert_eq!(r.line_clear_score, 200);
        assert!(!r.qualifies_for_b2b);
        assert!(!r.b2b_applied);
    }

    #[test]
    fn test_b2b_multiplier_rounds_half_up() {
        assert_eq!(apply_b2b_multiplier(1600), 2400);
        assert_eq!(apply_b2b_multiplier(1), 2);
        assert_eq!(apply_b2b_multiplier(3), 5);
        assert_eq!(apply_b2b_multiplier(0), 0);
    }

    #[test]
    fn test_b2b_quad() {
        let r = calculate_score(4, 1, TSpinKind::None, 1, true);
        assert!(r.b2b_applied);
        assert_eq!(r.line_clear_score, 2400);
        assert_eq!(r.total, 2400);
    }

    #[test]
    fn test_combo_bonus() {
        assert_eq!(calculate_combo_bonus(0), 0);
        assert_eq!(calculate_combo_bonus(1), 0);
        assert_eq!(calculate_combo_bonus(2), 50);
        assert_eq!(calculate_combo_bonus(5), 200);

        let r = calculate_score(1, 1, TSpinKind::None, 3, false);
        assert_eq!(r.line_clear_score, 200);
        assert_eq!(r.combo_bonus, 100);
        assert_eq!(r.total, 300);
    }

    #[test]
    fn test_no_lines_scores_nothing() {
        assert_eq!(
            calculate_score(0, 5, TSpinKind::Full, 4, true),
            ScoreResult::default()
        );
    }

    #[test]
    fn test_drop_score() {
        assert_eq!(calculate_drop_score(10, true), 20);
        assert_eq!(calculate_drop_score(10, false), 10);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(35), 4);
    }
}
