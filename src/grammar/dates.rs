//! Month dates, holiday dates, month-day ranges and week ranges.

use chrono::Month;

use super::Scan;
use super::combinators::{parse_list, parse_list_range};
use super::scanner::Scanner;
use super::schedule::scan_always_open;
use crate::model::{
    DayOfMonth, DayOfYear, DayOffset, DaySelector, HolidayDate, HolidayName, HourRange, MonthDate, MonthDayRange,
    NthWeekday, WeekRange, Year,
};

/// Whether an hour range (or a 24/7 alias) starts at the cursor. The cursor
/// never moves.
///
/// `Dec 24 10:00` and `Apr 5:30-6:30` both follow a month with a number; only
/// the second one is a time. `Jan-Dec 24/7` is not Dec 24.
pub(crate) fn could_be_hour_range(s: &mut Scanner<'_>) -> bool {
    s.probe(|s| HourRange::scan(s).is_some() || scan_always_open(s))
}

impl Scan for HolidayDate {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.attempt(|s| {
            let year = Year::scan(s);
            let holiday = HolidayName::scan(s)?;
            s.scan_word("day");
            let offset = DayOffset::scan(s);
            Some(HolidayDate { year, holiday, offset })
        })
    }
}

impl Scan for MonthDate {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.attempt(|s| {
            let year = Year::scan(s);
            let month = Month::scan(s)?;
            let selector = if could_be_hour_range(s) {
                None
            } else {
                DayOfMonth::scan(s).map(DaySelector::Day).or_else(|| NthWeekday::scan(s).map(DaySelector::NthWeekday))
            };
            Some(MonthDate { year, month, selector })
        })
    }
}

impl Scan for DayOfYear {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        MonthDate::scan(s).map(DayOfYear::MonthDate).or_else(|| HolidayDate::scan(s).map(DayOfYear::Holiday))
    }
}

const SEASONS: &[(&str, (Month, Month))] = &[
    ("summer", (Month::June, Month::August)),
    ("winter", (Month::December, Month::February)),
    ("spring", (Month::March, Month::May)),
    ("autumn", (Month::September, Month::November)),
];

impl Scan for MonthDayRange {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        if let Some((begin, end)) = s.scan_any_word(SEASONS) {
            return Some(MonthDayRange::months(begin, end));
        }

        let begin = DayOfYear::scan(s)?;
        let end = s.attempt(|s| {
            if !s.scan_dash() {
                return None;
            }
            // `Dec 1-5`: a bare day after a dated begin stays in its month.
            if let Some(date) = begin.as_month_date().filter(|date| date.day_of_month().is_some()) {
                if let Some(day) = DayOfMonth::scan(s) {
                    return Some(DayOfYear::MonthDate(MonthDate::day(date.month, day)));
                }
            }
            DayOfYear::scan(s)
        });
        let end = end.unwrap_or_else(|| begin.clone());
        Some(MonthDayRange { begin, end })
    }
}

/// A bare day that continues a `Month d1-d2` list, unless it is really a time.
fn continued_day(s: &mut Scanner<'_>) -> Option<DayOfMonth> {
    if could_be_hour_range(s) { None } else { DayOfMonth::scan(s) }
}

/// The comma-separated month/day selectors at the head of a rule.
///
/// After a plain `Month d1-d2` entry, bare days reuse its month:
///
/// ```text
/// Dec 1-5,8,10-12  ->  [Dec 1-5, Dec 8, Dec 10-12]
/// ```
pub(crate) fn scan_month_day_ranges(s: &mut Scanner<'_>) -> Vec<MonthDayRange> {
    let mut ranges: Vec<MonthDayRange> = Vec::new();
    loop {
        let safe = s.cursor();
        if !ranges.is_empty() && !s.scan_str(",") {
            break;
        }
        if let Some(month) = ranges.last().and_then(MonthDayRange::shared_day_month) {
            if let Some(days) = parse_list_range(s, continued_day) {
                ranges.extend(days.into_iter().map(|(begin, end)| MonthDayRange::days(month, begin, end)));
                continue;
            }
        }
        match MonthDayRange::scan(s) {
            Some(range) => ranges.push(range),
            None => {
                s.rewind(safe);
                break;
            }
        }
    }
    ranges
}

// --- Weeks ---------------------------------------------------------------------

fn scan_week_number(s: &mut Scanner<'_>) -> Option<u8> {
    s.attempt(|s| u8::try_from(s.scan_uint()?).ok().filter(|week| (1..=53).contains(week)))
}

impl Scan for WeekRange {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        let begin = scan_week_number(s)?;
        let end = s.attempt(|s| if s.scan_dash() { scan_week_number(s) } else { None }).unwrap_or(begin);
        let step = s.attempt(|s| if s.scan_str("/") { s.scan_uint().filter(|step| *step > 0) } else { None });
        Some(WeekRange { begin, end, step })
    }
}

/// `week 1-20/2,30`
pub(crate) fn scan_week_ranges(s: &mut Scanner<'_>) -> Vec<WeekRange> {
    s.attempt(|s| if s.scan_word("week") { parse_list(s, WeekRange::scan, ",") } else { None }).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;
    use crate::model::NthEntry;

    fn day(d: i32) -> DayOfMonth {
        DayOfMonth::new(d).unwrap()
    }

    fn ranges(text: &str) -> (Vec<MonthDayRange>, String) {
        let mut s = Scanner::new(text);
        let ranges = scan_month_day_ranges(&mut s);
        (ranges, s.rest().to_string())
    }

    #[test]
    fn month_followed_by_time_has_no_day() {
        let mut s = Scanner::new("Apr 5:30-6:30");
        assert_eq!(MonthDate::scan(&mut s), Some(MonthDate::month(Month::April)));
        assert_eq!(s.rest(), " 5:30-6:30");
    }

    #[test]
    fn month_followed_by_number_takes_it_as_day() {
        let mut s = Scanner::new("Dec 24 10:00-12:00");
        assert_eq!(MonthDate::scan(&mut s), Some(MonthDate::day(Month::December, day(24))));
    }

    #[test]
    fn month_with_year_and_nth_weekday() {
        let mut s = Scanner::new("2024 Apr Fr[-1]");
        assert_eq!(
            MonthDate::scan(&mut s),
            Some(MonthDate {
                year: Year::new(2024),
                month: Month::April,
                selector: Some(DaySelector::NthWeekday(NthWeekday { weekday: Weekday::Fri, nth: NthEntry::single(-1) })),
            })
        );
    }

    #[test]
    fn probe_leaves_cursor_alone() {
        let mut s = Scanner::new("10:00-12:00");
        assert!(could_be_hour_range(&mut s));
        assert_eq!(s.cursor(), 0);
        let mut s = Scanner::new("24 Mo");
        assert!(!could_be_hour_range(&mut s));
    }

    #[test]
    fn holiday_dates() {
        let mut s = Scanner::new("2025 Thanksgiving Day +1 day");
        assert_eq!(
            HolidayDate::scan(&mut s),
            Some(HolidayDate {
                year: Year::new(2025),
                holiday: HolidayName::Thanksgiving,
                offset: Some(DayOffset { days: 1 })
            })
        );
        assert!(s.is_at_end());
    }

    #[test]
    fn seasons_expand_to_months() {
        assert_eq!(ranges("winter").0, vec![MonthDayRange::months(Month::December, Month::February)]);
        assert_eq!(ranges("Summer").0, vec![MonthDayRange::months(Month::June, Month::August)]);
    }

    #[test]
    fn month_spans_and_single_months() {
        let (found, rest) = ranges("Jan-Mar,Jul 10:00-12:00");
        assert_eq!(
            found,
            vec![MonthDayRange::months(Month::January, Month::March), MonthDayRange::months(Month::July, Month::July)]
        );
        assert_eq!(rest, " 10:00-12:00");
    }

    #[test]
    fn day_range_shorthand_and_continuation() {
        let (found, rest) = ranges("Dec 1-5,8,10-12 Mo");
        assert_eq!(
            found,
            vec![
                MonthDayRange::days(Month::December, day(1), day(5)),
                MonthDayRange::days(Month::December, day(8), day(8)),
                MonthDayRange::days(Month::December, day(10), day(12)),
            ]
        );
        assert_eq!(rest, " Mo");
    }

    #[test]
    fn continuation_stops_before_times() {
        let (found, rest) = ranges("Dec 24,10:00-12:00");
        assert_eq!(found, vec![MonthDayRange::days(Month::December, day(24), day(24))]);
        assert_eq!(rest, ",10:00-12:00");
    }

    #[test]
    fn range_across_months() {
        let (found, _) = ranges("Dec 24-Jan 2");
        assert_eq!(
            found,
            vec![MonthDayRange {
                begin: DayOfYear::MonthDate(MonthDate::day(Month::December, day(24))),
                end: DayOfYear::MonthDate(MonthDate::day(Month::January, day(2))),
            }]
        );
    }

    #[test]
    fn easter_range() {
        let (found, rest) = ranges("easter -2 days-easter");
        let easter = |offset| DayOfYear::Holiday(HolidayDate { year: None, holiday: HolidayName::Easter, offset });
        assert_eq!(found, vec![MonthDayRange { begin: easter(Some(DayOffset { days: -2 })), end: easter(None) }]);
        assert!(rest.is_empty());
    }

    #[test]
    fn week_ranges() {
        let mut s = Scanner::new("week 1-20/2, 30 Mo");
        assert_eq!(
            scan_week_ranges(&mut s),
            vec![WeekRange { begin: 1, end: 20, step: Some(2) }, WeekRange { begin: 30, end: 30, step: None }]
        );
        assert_eq!(s.rest(), " Mo");

        let mut s = Scanner::new("week 60");
        assert!(scan_week_ranges(&mut s).is_empty());
        assert_eq!(s.cursor(), 0);
    }
}
