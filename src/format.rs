//! Canonical text for every node of the rule tree.
//!
//! Serialization is `Display`. The output is the fixed point of the parser:
//! parsing it again yields an equal tree for anything built through the
//! editor, and re-serializing it yields the same text for anything parsed.

use std::fmt::{self, Display, Formatter};

use crate::model::{
    ClockValue, Comment, DayOfYear, DayOffset, DaySelector, DaysHours, HolidayDate, HourRange, Modifier, MonthDate,
    MonthDayRange, NthEntry, NthEntryList, NthWeekday, PublicHoliday, Rule, RuleList, RuleSeparator, WeekRange,
    WeekdayRange, month_abbrev, weekday_code,
};

fn join<T: Display>(items: &[T], separator: &str) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(separator)
}

/// Join the parts that have any text, skipping empty ones.
fn join_nonempty(parts: impl IntoIterator<Item = String>, separator: &str) -> String {
    parts.into_iter().filter(|part| !part.is_empty()).collect::<Vec<_>>().join(separator)
}

// --- Times ---------------------------------------------------------------------

fn write_hh_mm(f: &mut Formatter<'_>, minutes: u32) -> fmt::Result {
    write!(f, "{:02}:{:02}", minutes / 60, minutes % 60)
}

impl Display for ClockValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ClockValue::Minutes(minutes) => write_hh_mm(f, minutes),
            ClockValue::Solar { event, offset: 0 } => f.write_str(event.name()),
            ClockValue::Solar { event, offset } => {
                write!(f, "({}{}", event.name(), if offset < 0 { '-' } else { '+' })?;
                write_hh_mm(f, offset.unsigned_abs())?;
                f.write_str(")")
            }
            ClockValue::Unspecified => Ok(()),
        }
    }
}

impl Display for HourRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.begin)?;
        if self.end != ClockValue::Unspecified {
            write!(f, "-{}", self.end)?;
        }
        if self.open_ended {
            f.write_str("+")?;
        }
        Ok(())
    }
}

// --- Days ----------------------------------------------------------------------

impl Display for PublicHoliday {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Display for NthEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_single() { write!(f, "{}", self.begin) } else { write!(f, "{}-{}", self.begin, self.end) }
    }
}

impl Display for NthEntryList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", join(&self.entries, ","))
    }
}

impl Display for NthWeekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", weekday_code(self.weekday), self.nth)
    }
}

impl Display for DayOffset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.days < 0 { '-' } else { '+' };
        let days = self.days.unsigned_abs();
        write!(f, "{sign}{days} {}", if days == 1 { "day" } else { "days" })
    }
}

impl Display for WeekdayRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            WeekdayRange::Holiday(holiday) => write!(f, "{holiday}"),
            WeekdayRange::Single { day, nth, offset } => {
                f.write_str(weekday_code(*day))?;
                if let Some(nth) = nth {
                    write!(f, "{nth}")?;
                }
                if let Some(offset) = offset {
                    write!(f, " {offset}")?;
                }
                Ok(())
            }
            WeekdayRange::Span(begin, end) if begin == end => f.write_str(weekday_code(*begin)),
            WeekdayRange::Span(begin, end) => write!(f, "{}-{}", weekday_code(*begin), weekday_code(*end)),
        }
    }
}

impl Display for DaysHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_24_7() {
            return f.write_str("24/7");
        }
        let days = join_nonempty([join(&self.holidays, ","), join(&self.weekdays, ",")], ",");
        f.write_str(&join_nonempty([join(&self.holiday_filter, ","), days, join(&self.hours, ",")], " "))
    }
}

// --- Dates ---------------------------------------------------------------------

impl Display for DaySelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DaySelector::Day(day) => write!(f, "{}", day.get()),
            DaySelector::NthWeekday(nth) => write!(f, "{nth}"),
        }
    }
}

impl Display for MonthDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let year = self.year.map(|y| y.get().to_string()).unwrap_or_default();
        let selector = self.selector.map(|s| s.to_string()).unwrap_or_default();
        f.write_str(&join_nonempty([year, month_abbrev(self.month).to_string(), selector], " "))
    }
}

impl Display for HolidayDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let year = self.year.map(|y| y.get().to_string()).unwrap_or_default();
        let offset = self.offset.map(|o| o.to_string()).unwrap_or_default();
        f.write_str(&join_nonempty([year, self.holiday.name().to_string(), offset], " "))
    }
}

impl Display for DayOfYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DayOfYear::MonthDate(date) => write!(f, "{date}"),
            DayOfYear::Holiday(date) => write!(f, "{date}"),
        }
    }
}

impl Display for MonthDayRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.begin == self.end {
            return write!(f, "{}", self.begin);
        }
        // `Dec 1-5`
        if let (DayOfYear::MonthDate(begin), DayOfYear::MonthDate(end)) = (&self.begin, &self.end) {
            if let (Some(_), Some(day)) = (begin.day_of_month(), end.day_of_month()) {
                if begin.month == end.month && end.year.is_none() {
                    return write!(f, "{begin}-{}", day.get());
                }
            }
        }
        write!(f, "{}-{}", self.begin, self.end)
    }
}

impl Display for WeekRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.begin)?;
        if self.end != self.begin {
            write!(f, "-{}", self.end)?;
        }
        if let Some(step) = self.step {
            write!(f, "/{step}")?;
        }
        Ok(())
    }
}

// --- Rules ---------------------------------------------------------------------

impl Display for Modifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl Display for Comment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.text)
    }
}

impl Display for RuleSeparator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let weeks = if self.weeks.is_empty() { String::new() } else { format!("week {}", join(&self.weeks, ",")) };
        let mut head = join_nonempty([join(&self.months, ","), weeks], " ");
        if self.readability_separator && !head.is_empty() {
            head.push(':');
        }
        let parts = [
            head,
            join(&self.days_hours, ", "),
            self.modifier.map(|m| m.to_string()).unwrap_or_default(),
            self.comment.as_ref().map(|c| c.to_string()).unwrap_or_default(),
        ];
        f.write_str(&join_nonempty(parts, " "))
    }
}

impl Display for RuleList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let last = self.rules.len().saturating_sub(1);
        for (index, rule) in self.rules.iter().enumerate() {
            write!(f, "{rule}")?;
            if index == last {
                break;
            }
            f.write_str(match rule.separator {
                Some(RuleSeparator::Semicolon) => "; ",
                Some(RuleSeparator::Comma) => ", ",
                Some(RuleSeparator::DoubleBar) => " || ",
                None => " ",
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Month, Weekday};

    use super::*;
    use crate::model::{DayOfMonth, HolidayName, SolarEvent, Year};

    #[test]
    fn clock_values() {
        assert_eq!(ClockValue::Minutes(5).to_string(), "00:05");
        assert_eq!(ClockValue::END_OF_DAY.to_string(), "24:00");
        assert_eq!(ClockValue::Solar { event: SolarEvent::Dawn, offset: 0 }.to_string(), "dawn");
        assert_eq!(ClockValue::Solar { event: SolarEvent::Sunset, offset: -90 }.to_string(), "(sunset-01:30)");
    }

    #[test]
    fn hour_ranges() {
        let open = HourRange { begin: ClockValue::Minutes(17 * 60), end: ClockValue::Unspecified, open_ended: true };
        assert_eq!(open.to_string(), "17:00+");
        assert_eq!(HourRange::default().to_string(), "10:00-18:00");
        assert_eq!(HourRange::DAYTIME.to_string(), "sunrise-sunset");
    }

    #[test]
    fn weekday_ranges() {
        let single = WeekdayRange::Single {
            day: Weekday::Mon,
            nth: Some(NthEntryList { entries: vec![NthEntry { begin: 1, end: 2 }, NthEntry::single(-1)] }),
            offset: Some(DayOffset { days: 2 }),
        };
        assert_eq!(single.to_string(), "Mo[1-2,-1] +2 days");
        assert_eq!(WeekdayRange::Span(Weekday::Fri, Weekday::Fri).to_string(), "Fr");
        assert_eq!(WeekdayRange::Span(Weekday::Sat, Weekday::Sun).to_string(), "Sa-Su");
        assert_eq!(DayOffset { days: -1 }.to_string(), "-1 day");
    }

    #[test]
    fn groups() {
        assert_eq!(DaysHours::always().to_string(), "24/7");
        assert_eq!(DaysHours::starter().to_string(), "Mo-Su 10:00-18:00");
        let group = DaysHours {
            weekdays: vec![WeekdayRange::Span(Weekday::Sat, Weekday::Sun)],
            holidays: vec![PublicHoliday::School],
            holiday_filter: vec![PublicHoliday::Public],
            hours: vec![HourRange::default(), HourRange::DAYTIME],
        };
        assert_eq!(group.to_string(), "PH SH,Sa-Su 10:00-18:00,sunrise-sunset");
    }

    #[test]
    fn dates() {
        let day = |d| DayOfMonth::new(d).unwrap();
        assert_eq!(MonthDayRange::days(Month::December, day(1), day(5)).to_string(), "Dec 1-5");
        assert_eq!(MonthDayRange::days(Month::December, day(8), day(8)).to_string(), "Dec 8");
        assert_eq!(MonthDayRange::default().to_string(), "Jan-Dec");
        let across = MonthDayRange {
            begin: DayOfYear::MonthDate(MonthDate { year: Year::new(2024), ..MonthDate::day(Month::December, day(24)) }),
            end: DayOfYear::MonthDate(MonthDate { year: Year::new(2025), ..MonthDate::day(Month::January, day(2)) }),
        };
        assert_eq!(across.to_string(), "2024 Dec 24-2025 Jan 2");
        let easter = HolidayDate { year: None, holiday: HolidayName::Easter, offset: Some(DayOffset { days: -2 }) };
        assert_eq!(easter.to_string(), "easter -2 days");
    }

    #[test]
    fn rules_and_lists() {
        let rule = Rule {
            months: vec![MonthDayRange::months(Month::April, Month::October)],
            weeks: vec![WeekRange { begin: 1, end: 5, step: Some(2) }, WeekRange { begin: 10, end: 10, step: None }],
            readability_separator: true,
            days_hours: vec![DaysHours::starter(), DaysHours::always()],
            modifier: Some(Modifier::Open),
            comment: Some(Comment { text: "ask first".into() }),
            separator: Some(RuleSeparator::DoubleBar),
        };
        assert_eq!(rule.to_string(), r#"Apr-Oct week 1-5/2,10: Mo-Su 10:00-18:00, 24/7 open "ask first""#);

        let closed = Rule { modifier: Some(Modifier::Closed), ..Rule::default() };
        let list = RuleList { rules: vec![rule.clone(), closed.clone(), rule] };
        assert!(list.to_string().contains(r#""ask first" || closed "#));
        assert!(list.to_string().ends_with(r#""ask first""#));
        assert_eq!(RuleList::default().to_string(), "");
    }
}
