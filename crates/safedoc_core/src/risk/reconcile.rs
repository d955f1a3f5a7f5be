//! Quadrant text reconciliation.
//!
//! # Responsibility
//! - Apply one risk toggle to one quadrant's free text.
//! - Preserve every line that does not belong to the toggled risk.
//!
//! # Invariants
//! - Output lines are trimmed, non-empty and unique.
//! - Lines with a leading integer are in ascending numeric order; lines
//!   without one follow them in first-seen order.
//! - Reconciliation is pure: same inputs always give the same output.

use crate::risk::RiskId;
use std::collections::HashSet;

/// Rule deciding whether a quadrant line belongs to a given risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineAttribution {
    /// Line equals the risk number, or starts with it followed by a non-digit.
    ///
    /// Risk `1` owns `"1"`, `"1. note"` and `"1 note"`, but never `"10"`.
    #[default]
    Bounded,
    /// Line starts with the risk number at all.
    ///
    /// Compatible with documents produced by the first release of the form
    /// tool. Risk `1` also owns `"10"` to `"19"`.
    LegacyPrefix,
}

impl LineAttribution {
    /// Returns whether `line` (already trimmed) is attributed to `risk_id`.
    pub fn attributes(self, line: &str, risk_id: RiskId) -> bool {
        let token = risk_id.to_string();
        match self {
            Self::Bounded => match line.strip_prefix(token.as_str()) {
                Some(rest) => rest.chars().next().map_or(true, |c| !c.is_ascii_digit()),
                None => false,
            },
            // Covers the exact token and the "N." form as well.
            Self::LegacyPrefix => line.starts_with(token.as_str()),
        }
    }
}

/// Reconciles one quadrant with bounded line attribution.
///
/// Removes every line owned by `risk_id`, then inserts `entry_token` when
/// `add` is true. See [`reconcile_quadrant_with`].
pub fn reconcile_quadrant(current_text: &str, risk_id: RiskId, entry_token: &str, add: bool) -> String {
    reconcile_quadrant_with(current_text, risk_id, entry_token, add, LineAttribution::Bounded)
}

/// Reconciles one quadrant using an explicit attribution rule.
///
/// # Contract
/// - Lines are trimmed and empty lines dropped before anything else.
/// - Lines owned by `risk_id` are removed regardless of `add`.
/// - `entry_token` (trimmed) is appended when `add` is true and non-empty.
/// - Duplicate lines collapse to their first occurrence.
/// - Result is sorted by leading integer and joined with `\n`.
pub fn reconcile_quadrant_with(
    current_text: &str,
    risk_id: RiskId,
    entry_token: &str,
    add: bool,
    attribution: LineAttribution,
) -> String {
    let mut seen = HashSet::new();
    let mut lines: Vec<&str> = current_text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !attribution.attributes(line, risk_id))
        .filter(|line| seen.insert(*line))
        .collect();

    let entry = entry_token.trim();
    if add && !entry.is_empty() && seen.insert(entry) {
        lines.push(entry);
    }

    lines.sort_by_key(|line| match leading_number(line) {
        Some(number) => (0_u8, number),
        None => (1_u8, 0),
    });
    lines.join("\n")
}

/// Returns the integer a line is ordered by, if any.
///
/// Uses the text before the first `.` (or the whole line when that part is
/// empty) and reads an optional sign followed by leading ASCII digits.
pub fn leading_number(line: &str) -> Option<i64> {
    let head = match line.split('.').next() {
        Some(head) if !head.is_empty() => head,
        _ => line,
    };
    parse_integer_prefix(head)
}

fn parse_integer_prefix(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0_i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::{leading_number, reconcile_quadrant, reconcile_quadrant_with, LineAttribution};

    #[test]
    fn repeated_add_is_idempotent() {
        let text = "2\n7. cabo solto\nobservar pátio";
        let once = reconcile_quadrant(text, 4, "4", true);
        let twice = reconcile_quadrant(&once, 4, "4", true);
        assert_eq!(once, twice);
        assert_eq!(once, "2\n4\n7. cabo solto\nobservar pátio");
    }

    #[test]
    fn repeated_remove_is_idempotent() {
        let text = "3\n4. escada\n9";
        let once = reconcile_quadrant(text, 4, "4", false);
        let twice = reconcile_quadrant(&once, 4, "4", false);
        assert_eq!(once, twice);
        assert_eq!(once, "3\n9");
    }

    #[test]
    fn add_then_remove_on_empty_returns_empty() {
        let added = reconcile_quadrant("", 5, "5", true);
        assert_eq!(added, "5");
        assert_eq!(reconcile_quadrant(&added, 5, "5", false), "");
    }

    #[test]
    fn removal_only_touches_the_toggled_risk() {
        let result = reconcile_quadrant("3.\n7. some note", 3, "3", false);
        assert_eq!(result, "7. some note");
    }

    #[test]
    fn removal_is_line_based_not_substring_based() {
        let result = reconcile_quadrant("7. risco 3 na rampa", 3, "3", false);
        assert_eq!(result, "7. risco 3 na rampa");
    }

    #[test]
    fn duplicate_lines_collapse() {
        assert_eq!(reconcile_quadrant("5\n5", 5, "5", true), "5");
        assert_eq!(reconcile_quadrant("9\n9\n", 5, "5", true), "5\n9");
    }

    #[test]
    fn ordering_is_numeric_not_lexicographic() {
        assert_eq!(reconcile_quadrant("10\n2", 2, "2", true), "2\n10");
        assert_eq!(reconcile_quadrant("12\n3. nota\n1", 7, "7", true), "1\n3. nota\n7\n12");
    }

    #[test]
    fn manual_edit_with_description_is_replaced_by_bare_token() {
        let result = reconcile_quadrant("6. piso molhado\n8", 6, "6", true);
        assert_eq!(result, "6\n8");
    }

    #[test]
    fn whitespace_and_blank_lines_are_normalized() {
        let result = reconcile_quadrant("  \n 9 \n\n\t1. ok\r\n", 4, "4", true);
        assert_eq!(result, "1. ok\n4\n9");
    }

    #[test]
    fn unparseable_lines_follow_numeric_lines_in_first_seen_order() {
        let result = reconcile_quadrant("zeta\n10\nalfa\n3", 1, "1", true);
        assert_eq!(result, "1\n3\n10\nzeta\nalfa");
    }

    #[test]
    fn bounded_attribution_keeps_multi_digit_neighbours() {
        let result = reconcile_quadrant("1\n10\n12. note", 1, "1", false);
        assert_eq!(result, "10\n12. note");
    }

    #[test]
    fn legacy_prefix_attribution_over_matches() {
        let result =
            reconcile_quadrant_with("1\n10\n12. note\n2", 1, "1", false, LineAttribution::LegacyPrefix);
        assert_eq!(result, "2");
    }

    #[test]
    fn attribution_rules_classify_lines() {
        let bounded = LineAttribution::Bounded;
        assert!(bounded.attributes("3", 3));
        assert!(bounded.attributes("3. texto", 3));
        assert!(bounded.attributes("3 texto", 3));
        assert!(!bounded.attributes("30", 3));
        assert!(!bounded.attributes("13", 3));

        let legacy = LineAttribution::LegacyPrefix;
        assert!(legacy.attributes("30", 3));
        assert!(!legacy.attributes("13", 3));
    }

    #[test]
    fn empty_entry_token_is_not_inserted() {
        assert_eq!(reconcile_quadrant("2", 4, "  ", true), "2");
    }

    #[test]
    fn leading_number_follows_parse_int_rules() {
        assert_eq!(leading_number("12. texto"), Some(12));
        assert_eq!(leading_number("7 texto"), Some(7));
        assert_eq!(leading_number("-4"), Some(-4));
        assert_eq!(leading_number("texto"), None);
        assert_eq!(leading_number(".5"), None);
        assert_eq!(leading_number("99999999999999999999999"), Some(i64::MAX));
    }
}
