//! Rules, rule lists and the top-level entry point.

use super::Scan;
use super::combinators::parse_list;
use super::dates::{scan_month_day_ranges, scan_week_ranges};
use super::scanner::Scanner;
use crate::model::{Comment, DaysHours, Modifier, Rule, RuleList, RuleSeparator};

impl Scan for RuleSeparator {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        RuleSeparator::ALL.into_iter().find(|separator| s.scan_str(separator.token()))
    }
}

impl Scan for Rule {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.attempt(|s| {
            let months = scan_month_day_ranges(s);
            let weeks = scan_week_ranges(s);
            let readability_separator = !(months.is_empty() && weeks.is_empty()) && s.scan_str(":");
            let days_hours = parse_list(s, DaysHours::scan, ",").unwrap_or_default();
            let modifier = Modifier::scan(s);
            let comment = Comment::scan(s);

            let rule = Rule { months, weeks, readability_separator, days_hours, modifier, comment, separator: None };
            if rule.is_empty() {
                return None;
            }
            Some(Rule { separator: RuleSeparator::scan(s), ..rule })
        })
    }
}

impl Scan for RuleList {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        parse_list(s, Rule::scan, "").map(|rules| RuleList { rules })
    }
}

/// Parse a whole opening_hours string.
///
/// On failure the error is the character offset of the cursor after the last
/// rule that parsed, which is where the first unreadable text begins.
pub(crate) fn parse_rule_list(text: &str) -> Result<RuleList, usize> {
    let mut s = Scanner::new(text);
    match RuleList::scan(&mut s) {
        Some(list) if s.is_at_end() => Ok(list),
        Some(_) | None => Err(s.char_offset()),
    }
}
