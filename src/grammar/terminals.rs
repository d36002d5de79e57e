//! Atomic vocabulary: clock values, weekdays, months, years and friends.

use chrono::{Month, Weekday};

use super::Scan;
use super::combinators::parse_list;
use super::scanner::{Scanner, is_prefix_ignore_case};
use crate::model::{
    ClockValue, Comment, DayOfMonth, DayOffset, HolidayName, MINUTES_PER_DAY, Modifier, NthEntry, NthEntryList,
    NthWeekday, PublicHoliday, SolarEvent, Year,
};

// --- Clock values ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

const MERIDIEMS: &[(&str, Meridiem)] =
    &[("AM", Meridiem::Am), ("A.M.", Meridiem::Am), ("PM", Meridiem::Pm), ("P.M.", Meridiem::Pm)];

impl Scan for ClockValue {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.attempt(scan_numeric_time).or_else(|| s.attempt(scan_solar_time))
    }
}

/// `9:30`, `09.30`, `9_30`, `9:30 pm`, `9 a.m.`
fn scan_numeric_time(s: &mut Scanner<'_>) -> Option<ClockValue> {
    s.skip_blanks();
    let (hour, minute) = s.adjacent(|s| {
        let hour = s.scan_uint().filter(|h| *h <= 24)?;
        let minute = s.attempt(|s| {
            s.scan_one_of(":_.")?;
            s.scan_uint().filter(|m| *m < 60)
        });
        Some((hour, minute))
    })?;

    match (s.scan_any_word(MERIDIEMS), minute) {
        (Some(meridiem), minute) => {
            let base = if meridiem == Meridiem::Pm { 12 } else { 0 };
            let minutes = (base + hour % 12) * 60 + minute.unwrap_or(0);
            (minutes <= MINUTES_PER_DAY).then_some(ClockValue::Minutes(minutes))
        }
        // A bare number is a day or a year, never a time.
        (None, None) => None,
        (None, Some(minute)) => ClockValue::at(hour, minute),
    }
}

/// `sunset`, `(sunrise+00:30)`, `(dusk-1:00)`
fn scan_solar_time(s: &mut Scanner<'_>) -> Option<ClockValue> {
    if let Some(event) = scan_solar_event(s) {
        return Some(ClockValue::Solar { event, offset: 0 });
    }
    if !s.scan_str("(") {
        return None;
    }
    let event = scan_solar_event(s)?;
    let sign = if s.scan_one_of("+-")? == '-' { -1 } else { 1 };
    let offset = sign * i32::try_from(scan_numeric_time(s)?.minutes()?).ok()?;
    s.scan_str(")").then_some(ClockValue::Solar { event, offset })
}

fn scan_solar_event(s: &mut Scanner<'_>) -> Option<SolarEvent> {
    SolarEvent::ALL.into_iter().find(|event| s.scan_word(event.name()))
}

// --- Weekdays and months -------------------------------------------------------

/// Accepted spellings per weekday; any 2+ letter prefix of one of them matches.
const WEEKDAY_SYNONYMS: [(Weekday, &[&str]); 7] = [
    (Weekday::Mon, &["Monday"]),
    (Weekday::Tue, &["Tuesday"]),
    (Weekday::Wed, &["Wednesday", "Weds"]),
    (Weekday::Thu, &["Thursday"]),
    (Weekday::Fri, &["Friday"]),
    (Weekday::Sat, &["Saturday"]),
    (Weekday::Sun, &["Sunday"]),
];

impl Scan for Weekday {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.attempt(|s| {
            let run = s.scan_letters()?;
            if run.chars().count() < 2 {
                return None;
            }
            let mut matches = WEEKDAY_SYNONYMS
                .iter()
                .filter(|(_, names)| names.iter().any(|name| is_prefix_ignore_case(run, name)))
                .map(|(day, _)| *day);
            let day = matches.next()?;
            // Ambiguous runs name no day at all.
            matches.next().is_none().then_some(day)
        })
    }
}

const MONTH_NAMES: &[(&str, Month)] = &[
    ("Jan", Month::January),
    ("January", Month::January),
    ("Feb", Month::February),
    ("February", Month::February),
    ("Mar", Month::March),
    ("March", Month::March),
    ("Apr", Month::April),
    ("April", Month::April),
    ("May", Month::May),
    ("Jun", Month::June),
    ("June", Month::June),
    ("Jul", Month::July),
    ("July", Month::July),
    ("Aug", Month::August),
    ("August", Month::August),
    ("Sep", Month::September),
    ("Sept", Month::September),
    ("September", Month::September),
    ("Oct", Month::October),
    ("October", Month::October),
    ("Nov", Month::November),
    ("November", Month::November),
    ("Dec", Month::December),
    ("December", Month::December),
];

impl Scan for Month {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.scan_any_word(MONTH_NAMES)
    }
}

// --- Numbers -------------------------------------------------------------------

impl Scan for Year {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.attempt(|s| Year::new(i32::try_from(s.scan_uint()?).ok()?))
    }
}

impl Scan for DayOfMonth {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.attempt(|s| DayOfMonth::new(i32::try_from(s.scan_uint()?).ok()?))
    }
}

impl Scan for PublicHoliday {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        PublicHoliday::ALL.into_iter().find(|holiday| s.scan_word(holiday.code()))
    }
}

impl Scan for HolidayName {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        HolidayName::ALL.into_iter().find(|holiday| s.scan_word(holiday.name()))
    }
}

// --- Nth entries ---------------------------------------------------------------

fn scan_nth_index(s: &mut Scanner<'_>) -> Option<i8> {
    s.attempt(|s| s.scan_int().filter(|n| NthEntry::in_range(*n)).and_then(|n| i8::try_from(n).ok()))
}

impl Scan for NthEntry {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        let begin = scan_nth_index(s)?;
        if begin > 0 {
            let end = s.attempt(|s| if s.scan_dash() { scan_nth_index(s).filter(|end| *end > 0) } else { None });
            if let Some(end) = end {
                return Some(NthEntry { begin, end });
            }
        }
        Some(NthEntry::single(begin))
    }
}

impl Scan for NthEntryList {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.attempt(|s| {
            if !s.scan_str("[") {
                return None;
            }
            let entries = parse_list(s, NthEntry::scan, ",")?;
            s.scan_str("]").then_some(NthEntryList { entries })
        })
    }
}

impl Scan for NthWeekday {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.attempt(|s| {
            let weekday = Weekday::scan(s)?;
            match NthEntryList::scan(s)?.entries.as_slice() {
                [nth] if nth.is_single() => Some(NthWeekday { weekday, nth: *nth }),
                _ => None,
            }
        })
    }
}

impl Scan for DayOffset {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.attempt(|s| {
            let sign = if s.scan_one_of("+-")? == '-' { -1 } else { 1 };
            let days = i32::try_from(s.scan_uint()?).ok().filter(|d| *d > 0)?;
            s.scan_word_prefix("days", 3).then_some(DayOffset { days: sign * days })
        })
    }
}

// --- Free text and modifiers ---------------------------------------------------

impl Scan for Comment {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.attempt(|s| {
            if !s.scan_str("\"") {
                return None;
            }
            let start = s.cursor();
            let len = s.rest().find('"')?;
            s.rewind(start + len + 1);
            Some(Comment { text: s.text_since(start)[..len].to_string() })
        })
    }
}

const MODIFIERS: &[(&str, Modifier)] = &[
    ("open", Modifier::Open),
    ("closed", Modifier::Closed),
    ("off", Modifier::Off),
    ("unknown", Modifier::Unknown),
];

impl Scan for Modifier {
    fn scan(s: &mut Scanner<'_>) -> Option<Self> {
        s.scan_any_word(MODIFIERS)
    }
}
