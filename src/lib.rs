//! Parser, canonical serializer and tree editor for OpenStreetMap
//! `opening_hours` strings.
//!
//! ```text
//!   text ──parse──▶ RuleList ──serialize──▶ canonical text
//!                      ▲  │
//!                      │  ▼
//!                    Editor (structural edits, change hooks)
//! ```
//!
//! The parser is tolerant: it accepts common real-world spellings (`9am-5pm`,
//! `Mon to Fri`, `summer`, `24 hours`) and always emits the canonical form.
//! Serializing a parsed tree and parsing the result again yields the same tree.
//!
//! ```
//! let rules = openhours::parse("mon to fri 9am-5pm; PH off").unwrap();
//! assert_eq!(openhours::serialize(&rules), "Mo-Fr 09:00-17:00; PH off");
//! ```

#[macro_use]
mod macros;
mod api;
mod editor;
mod error;
mod format;
mod grammar;
mod model;

pub mod corpus;

pub use api::{Options, Parsed, parse, parse_with, serialize};
pub use editor::Editor;
pub use error::{EditError, ParseError};
pub use model::{
    ClockValue, Comment, DayOfMonth, DayOfYear, DayOfYearKind, DayOffset, DaySelector, DaysHours, HolidayDate,
    HolidayName, HourRange, MINUTES_PER_DAY, MONTHS, MonthDate, MonthDayRange, Modifier, NthEntry, NthEntryList,
    NthWeekday, PublicHoliday, Rule, RuleList, RuleSeparator, SolarEvent, WEEK, WeekRange, WeekdayRange, WeekdaySet,
    Year, month_abbrev, weekday_code,
};
