//! Recursive-descent parser for opening_hours strings.
//!
//! Every node of the rule tree knows how to read itself through the [`Scan`]
//! trait. A production either returns a value and leaves the cursor after it,
//! or returns `None` and leaves the cursor where it found it. Failure is plain
//! control flow; only [`parse_rule_list`] turns "could not consume the whole
//! input" into an error position.
//!
//! ```text
//! RuleList   := Rule+
//! Rule       := MonthDayRange,* Weeks? ":"? DaysHours,* Modifier? Comment? (";" | "," | "||")?
//! DaysHours  := 24/7-alias
//!             | PH,*  ","?  WeekdayRange,*  ","?  PH,*  ":"?  "from"?  HourRange,*
//! HourRange  := "daytime" | Clock ("-" Clock)? "+"?
//! Clock      := hh[:mm] [AM|PM] | sunrise | "(" sunset "+" hh:mm ")" | ...
//! ```
//!
//! ## Responsibilities by module
//!
//! - `scanner.rs`: cursor, whitespace skipping, literals, numbers, dashes.
//! - `combinators.rs`: ranges and delimiter-separated lists with rewind.
//! - `terminals.rs`: clock values, weekdays, months, years, nth lists,
//!   offsets, comments, modifiers.
//! - `dates.rs`: month dates, holiday dates, month-day ranges, weeks.
//! - `schedule.rs`: hour ranges, weekday ranges, day/hours groups.
//! - `rules.rs`: rules, rule lists and the top-level entry point.
//!
//! ## Ambiguity
//!
//! `Dec 24 10:00-12:00` and `Apr 5:30-6:30` both put a number after a month.
//! The month-date production settles it with an isolated lookahead,
//! `dates::could_be_hour_range`, which parses an hour range and always restores the
//! cursor.

#[path = "grammar/combinators.rs"]
mod combinators;
#[path = "grammar/dates.rs"]
mod dates;
#[path = "grammar/rules.rs"]
mod rules;
#[path = "grammar/scanner.rs"]
mod scanner;
#[path = "grammar/schedule.rs"]
mod schedule;
#[path = "grammar/terminals.rs"]
mod terminals;

pub(crate) use rules::parse_rule_list;
pub(crate) use scanner::Scanner;

/// A production for one node type.
pub(crate) trait Scan: Sized {
    fn scan(s: &mut Scanner<'_>) -> Option<Self>;
}
