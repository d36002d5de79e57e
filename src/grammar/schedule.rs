//! Hour ranges, weekday ranges and day/hours groups.

use chrono::Weekday;

use super::Scan;
use super::combinators::{parse_list, parse_range};
use super::scanner::Scanner;
use crate::model::{ClockValue, DayOffset, DaysHours, HourRange, NthEntryList, PublicHoliday, WeekdayRange};

/// Spellings of "open around the clock" that stand for a whole group.
const ALWAYS_OPEN: &[&str] =
    &["24/7", "24x7", "0-24", "24 hours", "24 hour", "24 hrs", "24hours", "24hr", "All day", "24 Horas"];

pub(crate) fn scan_always_open(s: &mut Scanner<'_>) -> bool {
    ALWAYS_OPEN.iter().any(|alias| {
        s.attempt(|s| {
            let whole = s.scan_str(alias) && !s.rest().starts_with(|c: char| c.is_alphanumeric() || c == ':');
            whole.then_some(())
        })
        .is_some()
    })
}

impl Scan for HourRange {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        let daytime = s.scan_word("daytime")
            || s.attempt(|s| (s.scan_word("day") && s.scan_word("time")).then_some(())).is_some();
        if daytime {
            return Some(HourRange::DAYTIME);
        }

        let begin = ClockValue::scan(s)?;
        let end = s.attempt(|s| if s.scan_dash() { ClockValue::scan(s) } else { None });
        let open_ended = s.scan_str("+");
        Some(HourRange { begin, end: end.unwrap_or(ClockValue::Unspecified), open_ended })
    }
}

fn scan_every_day(s: &mut Scanner<'_>) -> bool {
    s.scan_word("everyday")
        || s.scan_word("daily")
        || s.attempt(|s| (s.scan_word("every") && s.scan_word("day")).then_some(())).is_some()
}

impl Scan for WeekdayRange {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        if let Some(holiday) = PublicHoliday::scan(s) {
            return Some(WeekdayRange::Holiday(holiday));
        }
        if scan_every_day(s) {
            return Some(WeekdayRange::EVERY_DAY);
        }
        if s.scan_word("weekdays") {
            return Some(WeekdayRange::Span(Weekday::Mon, Weekday::Fri));
        }

        let (day, end) = parse_range(s, Weekday::scan)?;
        if day != end {
            return Some(WeekdayRange::Span(day, end));
        }
        let nth = NthEntryList::scan(s);
        let offset = DayOffset::scan(s);
        Some(WeekdayRange::Single { day, nth, offset })
    }
}

impl Scan for DaysHours {
    /// ```text
    /// PH,Sa-Su 10:00-12:00     holidays [PH], weekdays [Sa-Su]
    /// Sa-Su PH 10:00-12:00     holiday filter [PH], weekdays [Sa-Su]
    /// Sa-Su,PH 10:00-12:00     weekdays [Sa-Su, PH]
    /// ```
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.attempt(|s| {
            if scan_always_open(s) {
                return Some(DaysHours::always());
            }

            let leading = parse_list(s, PublicHoliday::scan, ",").unwrap_or_default();
            let leading_end = s.cursor();
            let leading_comma = !leading.is_empty() && s.scan_str(",");
            let weekdays = parse_list(s, WeekdayRange::scan, ",").unwrap_or_default();
            let weekdays_end = s.cursor();
            let trailing_comma = !weekdays.is_empty() && s.scan_str(",");
            let trailing = parse_list(s, PublicHoliday::scan, ",").unwrap_or_default();
            s.scan_str(":");
            let from = s.scan_word("from");
            let mut hours = parse_list(s, HourRange::scan, ",").unwrap_or_default();

            if leading.is_empty() && weekdays.is_empty() && trailing.is_empty() && hours.is_empty() {
                return None;
            }
            // A comma with nothing of this group after it separates the group
            // from whatever follows.
            if trailing.is_empty() && hours.is_empty() {
                if trailing_comma {
                    s.rewind(weekdays_end);
                } else if leading_comma && weekdays.is_empty() {
                    s.rewind(leading_end);
                }
            }
            if let [range] = hours.as_mut_slice() {
                if from && range.end == ClockValue::Unspecified {
                    range.open_ended = true;
                }
            }

            // A comma makes holidays co-equal with the weekdays; without one
            // they only narrow them. With no weekdays they are all filters.
            let (holidays, holiday_filter) = match (leading_comma, trailing_comma) {
                _ if weekdays.is_empty() => (Vec::new(), [leading, trailing].concat()),
                (true, true) => ([leading, trailing].concat(), Vec::new()),
                (true, false) => (leading, trailing),
                (false, true) => (trailing, leading),
                (false, false) => (Vec::new(), [leading, trailing].concat()),
            };
            Some(DaysHours { weekdays, holidays, holiday_filter, hours })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NthEntry;

    fn group(text: &str) -> Option<DaysHours> {
        let mut s = Scanner::new(text);
        DaysHours::scan(&mut s).filter(|_| s.is_at_end())
    }

    fn hours(begin: u32, end: u32) -> HourRange {
        HourRange::new(ClockValue::Minutes(begin * 60), ClockValue::Minutes(end * 60))
    }

    #[test]
    fn always_open_aliases() {
        for alias in ALWAYS_OPEN {
            assert_eq!(group(alias), Some(DaysHours::always()), "{alias}");
        }
        assert_eq!(group("24 HOURS"), Some(DaysHours::always()));
        assert_eq!(group("24/7x"), None);
    }

    #[test]
    fn hour_range_forms() {
        let mut s = Scanner::new("10:00-18:00");
        assert_eq!(HourRange::scan(&mut s), Some(hours(10, 18)));
        let mut s = Scanner::new("day time");
        assert_eq!(HourRange::scan(&mut s), Some(HourRange::DAYTIME));
        let mut s = Scanner::new("10 am to 6 pm");
        assert_eq!(HourRange::scan(&mut s), Some(hours(10, 18)));
        let mut s = Scanner::new("17:00+");
        assert_eq!(
            HourRange::scan(&mut s),
            Some(HourRange { begin: ClockValue::Minutes(17 * 60), end: ClockValue::Unspecified, open_ended: true })
        );
    }

    #[test]
    fn dangling_dash_leaves_end_unspecified() {
        let mut s = Scanner::new("10:00-Mo");
        let range = HourRange::scan(&mut s);
        assert_eq!(range.map(|r| r.end), Some(ClockValue::Unspecified));
        assert_eq!(s.rest(), "-Mo");
    }

    #[test]
    fn weekday_range_forms() {
        let scan = |text: &str| WeekdayRange::scan(&mut Scanner::new(text));
        assert_eq!(scan("Mo-Fr"), Some(WeekdayRange::Span(Weekday::Mon, Weekday::Fri)));
        assert_eq!(scan("Monday to Friday"), Some(WeekdayRange::Span(Weekday::Mon, Weekday::Fri)));
        assert_eq!(scan("weekdays"), Some(WeekdayRange::Span(Weekday::Mon, Weekday::Fri)));
        assert_eq!(scan("Every Day"), Some(WeekdayRange::EVERY_DAY));
        assert_eq!(scan("daily"), Some(WeekdayRange::EVERY_DAY));
        assert_eq!(scan("SH"), Some(WeekdayRange::Holiday(PublicHoliday::School)));
        assert_eq!(
            scan("Su[1,-1] -1 day"),
            Some(WeekdayRange::Single {
                day: Weekday::Sun,
                nth: Some(NthEntryList { entries: vec![NthEntry::single(1), NthEntry::single(-1)] }),
                offset: Some(DayOffset { days: -1 }),
            })
        );
    }

    #[test]
    fn holiday_roles_follow_commas() {
        let weekend = vec![WeekdayRange::Span(Weekday::Sat, Weekday::Sun)];
        assert_eq!(
            group("PH, Sa-Su 10:00-12:00"),
            Some(DaysHours {
                weekdays: weekend.clone(),
                holidays: vec![PublicHoliday::Public],
                holiday_filter: vec![],
                hours: vec![hours(10, 12)]
            })
        );
        assert_eq!(
            group("Sa-Su PH 10:00-12:00"),
            Some(DaysHours {
                weekdays: weekend.clone(),
                holidays: vec![],
                holiday_filter: vec![PublicHoliday::Public],
                hours: vec![hours(10, 12)]
            })
        );
        assert_eq!(
            group("SH Sa-Su, PH 10:00-12:00"),
            Some(DaysHours {
                weekdays: vec![WeekdayRange::Span(Weekday::Sat, Weekday::Sun), WeekdayRange::Holiday(PublicHoliday::Public)],
                holidays: vec![],
                holiday_filter: vec![PublicHoliday::School],
                hours: vec![hours(10, 12)]
            })
        );
    }

    #[test]
    fn holidays_without_weekdays_are_filters() {
        let expected = DaysHours { holiday_filter: vec![PublicHoliday::Public], ..DaysHours::default() };
        assert_eq!(group("PH"), Some(expected.clone()));
        assert_eq!(group("PH,"), None);

        let mut s = Scanner::new("PH, Jan Su");
        assert_eq!(DaysHours::scan(&mut s), Some(expected));
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn dangling_comma_is_left_for_the_next_group() {
        let mut s = Scanner::new("Sa, Jan Su");
        let found = DaysHours::scan(&mut s);
        assert_eq!(found.map(|g| g.weekdays), Some(vec![WeekdayRange::day(Weekday::Sat)]));
        assert_eq!(s.cursor(), 2);

        let found = group("Sa-Su, 10:00-12:00").map(|g| g.hours);
        assert_eq!(found, Some(vec![hours(10, 12)]));
    }

    #[test]
    fn from_marks_single_start_time_open_ended() {
        let found = group("Fr from 18:00").map(|g| g.hours);
        assert_eq!(
            found,
            Some(vec![HourRange { begin: ClockValue::Minutes(18 * 60), end: ClockValue::Unspecified, open_ended: true }])
        );
        let found = group("from 10:00-12:00").map(|g| g.hours);
        assert_eq!(found, Some(vec![hours(10, 12)]));
    }

    #[test]
    fn colon_after_days_and_several_hour_ranges() {
        let found = group("Mo-Fr: 08:00-12:00, 13:00-17:00");
        assert_eq!(found.map(|g| g.hours), Some(vec![hours(8, 12), hours(13, 17)]));
    }

    #[test]
    fn empty_group_is_no_group() {
        assert_eq!(group(""), None);
        assert_eq!(group(":"), None);
        let mut s = Scanner::new(": open");
        assert_eq!(DaysHours::scan(&mut s), None);
        assert_eq!(s.cursor(), 0);
    }
}
