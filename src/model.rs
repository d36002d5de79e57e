//! The rule tree.
//!
//! Every node is a plain value type; the [`Editor`](crate::Editor) owns the one
//! mutable root. Parsing lives in `grammar.rs`, canonical text in `format.rs`.
//!
//! ```text
//! RuleList
//!  └─ Rule*                      "Apr-Oct Su 10:00-18:00; ..."
//!      ├─ MonthDayRange*         "Apr-Oct", "Dec 1-5", "easter -2 days"
//!      ├─ WeekRange*             "week 1-20/2"
//!      ├─ DaysHours*             "PH,Mo-Fr 10:00-12:00,14:00-18:00"
//!      │   ├─ WeekdayRange*
//!      │   ├─ PublicHoliday*     (co-equal holidays and holiday filter)
//!      │   └─ HourRange*
//!      ├─ Modifier?
//!      ├─ Comment?
//!      └─ RuleSeparator?
//! ```

use chrono::{Month, Weekday};

/// Minutes in a day; the only literal clock value allowed to reach it is `24:00`.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// All seven days in canonical order.
pub const WEEK: [Weekday; 7] =
    [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat, Weekday::Sun];

/// All twelve months in canonical order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Two-letter canonical weekday code.
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

/// Three-letter canonical month name.
pub fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

// --- Clock values ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolarEvent {
    Sunrise,
    Sunset,
    Dawn,
    Dusk,
}

impl SolarEvent {
    pub const ALL: [SolarEvent; 4] = [SolarEvent::Sunrise, SolarEvent::Sunset, SolarEvent::Dawn, SolarEvent::Dusk];

    pub fn name(self) -> &'static str {
        match self {
            SolarEvent::Sunrise => "sunrise",
            SolarEvent::Sunset => "sunset",
            SolarEvent::Dawn => "dawn",
            SolarEvent::Dusk => "dusk",
        }
    }
}

/// A point in the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockValue {
    /// Minutes since midnight, `0..=1440`.
    Minutes(u32),
    /// A sun-relative time shifted by `offset` minutes.
    Solar { event: SolarEvent, offset: i32 },
    /// The missing end of a range that only gave a start time.
    Unspecified,
}

impl ClockValue {
    pub const MIDNIGHT: ClockValue = ClockValue::Minutes(0);
    pub const END_OF_DAY: ClockValue = ClockValue::Minutes(MINUTES_PER_DAY);

    /// Build a literal time, rejecting anything past `24:00`.
    pub fn at(hour: u32, minute: u32) -> Option<ClockValue> {
        let minutes = hour.checked_mul(60)?.checked_add(minute)?;
        (minute < 60 && minutes <= MINUTES_PER_DAY).then_some(ClockValue::Minutes(minutes))
    }

    pub fn minutes(self) -> Option<u32> {
        match self {
            ClockValue::Minutes(m) => Some(m),
            ClockValue::Solar { .. } | ClockValue::Unspecified => None,
        }
    }

    pub fn is_minutes(self) -> bool {
        self.minutes().is_some()
    }

    /// Hour component of a literal time; `0` for anything else.
    pub fn hour(self) -> u32 {
        self.minutes().map_or(0, |m| m / 60)
    }

    /// Minute component of a literal time; `0` for anything else.
    pub fn minute(self) -> u32 {
        self.minutes().map_or(0, |m| m % 60)
    }

    /// Replace the hour, keeping the minute of a literal time.
    pub fn with_hour(self, hour: u32) -> Option<ClockValue> {
        ClockValue::at(hour, self.minute())
    }

    /// Replace the minute, keeping the hour of a literal time.
    pub fn with_minute(self, minute: u32) -> Option<ClockValue> {
        ClockValue::at(self.hour(), minute)
    }
}

// --- Calendar atoms ----------------------------------------------------------

/// A four-digit year. Smaller numbers are day or hour numbers, never years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Year(i32);

impl Year {
    pub const MIN: i32 = 1900;

    pub fn new(year: i32) -> Option<Year> {
        (year >= Year::MIN).then_some(Year(year))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayOfMonth(u8);

impl DayOfMonth {
    pub fn new(day: i32) -> Option<DayOfMonth> {
        u8::try_from(day).ok().filter(|d| (1..=31).contains(d)).map(DayOfMonth)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicHoliday {
    /// `PH`
    Public,
    /// `SH`
    School,
}

impl PublicHoliday {
    pub const ALL: [PublicHoliday; 2] = [PublicHoliday::Public, PublicHoliday::School];

    pub fn code(self) -> &'static str {
        match self {
            PublicHoliday::Public => "PH",
            PublicHoliday::School => "SH",
        }
    }
}

/// An nth-occurrence index or range, e.g. `1`, `1-3`, `-1`.
///
/// Indices live in `1..=5` or `-5..=-1`; a dashed range only ever holds
/// positive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NthEntry {
    pub begin: i8,
    pub end: i8,
}

impl NthEntry {
    pub fn in_range(index: i32) -> bool {
        (1..=5).contains(&index) || (-5..=-1).contains(&index)
    }

    pub fn single(index: i8) -> NthEntry {
        NthEntry { begin: index, end: index }
    }

    pub fn is_single(self) -> bool {
        self.begin == self.end
    }
}

/// `[1,3,-1]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NthEntryList {
    pub entries: Vec<NthEntry>,
}

/// `Fr[-1]`: a weekday with exactly one singleton index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NthWeekday {
    pub weekday: Weekday,
    pub nth: NthEntry,
}

/// `+2 days`, `-1 day`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayOffset {
    pub days: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolidayName {
    Easter,
    Thanksgiving,
}

impl HolidayName {
    pub const ALL: [HolidayName; 2] = [HolidayName::Easter, HolidayName::Thanksgiving];

    pub fn name(self) -> &'static str {
        match self {
            HolidayName::Easter => "easter",
            HolidayName::Thanksgiving => "thanksgiving",
        }
    }
}

// --- Dates -------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HolidayDate {
    pub year: Option<Year>,
    pub holiday: HolidayName,
    pub offset: Option<DayOffset>,
}

/// The part of a month date after the month name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaySelector {
    Day(DayOfMonth),
    NthWeekday(NthWeekday),
}

/// `Jan`, `Jan 5`, `2024 Jan 5`, `Apr Fr[-1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthDate {
    pub year: Option<Year>,
    pub month: Month,
    pub selector: Option<DaySelector>,
}

impl MonthDate {
    pub fn month(month: Month) -> MonthDate {
        MonthDate { year: None, month, selector: None }
    }

    pub fn day(month: Month, day: DayOfMonth) -> MonthDate {
        MonthDate { year: None, month, selector: Some(DaySelector::Day(day)) }
    }

    pub fn day_of_month(&self) -> Option<DayOfMonth> {
        match self.selector {
            Some(DaySelector::Day(day)) => Some(day),
            Some(DaySelector::NthWeekday(_)) | None => None,
        }
    }
}

/// Which variant a [`DayOfYear`] currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayOfYearKind {
    Date,
    Holiday,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DayOfYear {
    MonthDate(MonthDate),
    Holiday(HolidayDate),
}

impl DayOfYear {
    pub fn as_month_date(&self) -> Option<&MonthDate> {
        match self {
            DayOfYear::MonthDate(date) => Some(date),
            DayOfYear::Holiday(_) => None,
        }
    }

    pub fn kind(&self) -> DayOfYearKind {
        match self {
            DayOfYear::MonthDate(_) => DayOfYearKind::Date,
            DayOfYear::Holiday(_) => DayOfYearKind::Holiday,
        }
    }

    /// Switch variant, resetting to that variant's default value.
    pub fn with_kind(&self, kind: DayOfYearKind) -> DayOfYear {
        match (self, kind) {
            (DayOfYear::MonthDate(_), DayOfYearKind::Date) | (DayOfYear::Holiday(_), DayOfYearKind::Holiday) => {
                self.clone()
            }
            (_, DayOfYearKind::Holiday) => {
                DayOfYear::Holiday(HolidayDate { year: None, holiday: HolidayName::Easter, offset: None })
            }
            (_, DayOfYearKind::Date) => {
                DayOfYear::MonthDate(MonthDate { year: None, month: Month::January, selector: None })
            }
        }
    }

    /// Labels for the "month" picker of this variant.
    pub fn month_choices(&self) -> Vec<&'static str> {
        match self {
            DayOfYear::MonthDate(_) => MONTHS.iter().map(|m| month_abbrev(*m)).collect(),
            DayOfYear::Holiday(_) => HolidayName::ALL.iter().map(|h| h.name()).collect(),
        }
    }

    /// Labels for the "day" picker; the leading empty label means "no day".
    pub fn day_choices(&self) -> Vec<String> {
        match self {
            DayOfYear::MonthDate(_) => std::iter::once(String::new()).chain((1..=31).map(|d| d.to_string())).collect(),
            DayOfYear::Holiday(_) => Vec::new(),
        }
    }

    /// Index into [`month_choices`](Self::month_choices) of the current value.
    pub fn month_choice(&self) -> usize {
        match self {
            DayOfYear::MonthDate(date) => date.month.number_from_month() as usize - 1,
            DayOfYear::Holiday(date) => HolidayName::ALL.iter().position(|h| *h == date.holiday).unwrap_or(0),
        }
    }

    /// Pick a month (or holiday) by its index in [`month_choices`](Self::month_choices).
    pub fn with_month_choice(&self, index: usize) -> Option<DayOfYear> {
        match self {
            DayOfYear::MonthDate(date) => {
                let month = *MONTHS.get(index)?;
                Some(DayOfYear::MonthDate(MonthDate { month, ..*date }))
            }
            DayOfYear::Holiday(_) => {
                let holiday = *HolidayName::ALL.get(index)?;
                Some(DayOfYear::Holiday(HolidayDate { year: None, holiday, offset: None }))
            }
        }
    }

    /// Set or clear the day of a month date. Holidays have no day.
    pub fn with_day(&self, day: Option<DayOfMonth>) -> DayOfYear {
        match self {
            DayOfYear::MonthDate(date) => {
                DayOfYear::MonthDate(MonthDate { selector: day.map(DaySelector::Day), ..*date })
            }
            DayOfYear::Holiday(_) => self.clone(),
        }
    }
}

/// `Apr-Oct`, `Dec 1-5`, `Dec 24-Jan 2`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonthDayRange {
    pub begin: DayOfYear,
    pub end: DayOfYear,
}

impl MonthDayRange {
    pub fn months(begin: Month, end: Month) -> MonthDayRange {
        MonthDayRange {
            begin: DayOfYear::MonthDate(MonthDate::month(begin)),
            end: DayOfYear::MonthDate(MonthDate::month(end)),
        }
    }

    pub fn days(month: Month, begin: DayOfMonth, end: DayOfMonth) -> MonthDayRange {
        MonthDayRange {
            begin: DayOfYear::MonthDate(MonthDate::day(month, begin)),
            end: DayOfYear::MonthDate(MonthDate::day(month, end)),
        }
    }

    /// The month shared by a plain `Month d1-d2` range, which lets a
    /// following bare day list reuse it.
    pub fn shared_day_month(&self) -> Option<Month> {
        let begin = self.begin.as_month_date()?;
        let end = self.end.as_month_date()?;
        let plain = begin.year.is_none() && end.year.is_none();
        let both_days = begin.day_of_month().is_some() && end.day_of_month().is_some();
        (plain && both_days && begin.month == end.month).then_some(begin.month)
    }
}

impl Default for MonthDayRange {
    fn default() -> Self {
        MonthDayRange::months(Month::January, Month::December)
    }
}

/// `week 1-20/2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekRange {
    pub begin: u8,
    pub end: u8,
    pub step: Option<u32>,
}

// --- Hours and days ----------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HourRange {
    pub begin: ClockValue,
    pub end: ClockValue,
    /// Trailing `+`.
    pub open_ended: bool,
}

impl HourRange {
    pub const ALL_DAY: HourRange =
        HourRange { begin: ClockValue::MIDNIGHT, end: ClockValue::END_OF_DAY, open_ended: false };

    pub const DAYTIME: HourRange = HourRange {
        begin: ClockValue::Solar { event: SolarEvent::Sunrise, offset: 0 },
        end: ClockValue::Solar { event: SolarEvent::Sunset, offset: 0 },
        open_ended: false,
    };

    pub fn new(begin: ClockValue, end: ClockValue) -> HourRange {
        HourRange { begin, end, open_ended: false }
    }

    pub fn is_24_hour(&self) -> bool {
        self.begin == ClockValue::MIDNIGHT && self.end == ClockValue::END_OF_DAY
    }
}

impl Default for HourRange {
    fn default() -> Self {
        HourRange::new(ClockValue::Minutes(10 * 60), ClockValue::Minutes(18 * 60))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WeekdayRange {
    Holiday(PublicHoliday),
    Single { day: Weekday, nth: Option<NthEntryList>, offset: Option<DayOffset> },
    Span(Weekday, Weekday),
}

impl WeekdayRange {
    pub const EVERY_DAY: WeekdayRange = WeekdayRange::Span(Weekday::Mon, Weekday::Sun);

    pub fn day(day: Weekday) -> WeekdayRange {
        WeekdayRange::Single { day, nth: None, offset: None }
    }
}

bitflags::bitflags! {
    /// A set of weekdays, used when toggling days on a group.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WeekdaySet: u8 {
        const MON = 1 << 0;
        const TUE = 1 << 1;
        const WED = 1 << 2;
        const THU = 1 << 3;
        const FRI = 1 << 4;
        const SAT = 1 << 5;
        const SUN = 1 << 6;
    }
}

impl WeekdaySet {
    pub fn day(day: Weekday) -> WeekdaySet {
        WeekdaySet::from_bits_truncate(1 << day.num_days_from_monday())
    }

    /// Days from `begin` to `end` inclusive, wrapping past Sunday.
    pub fn span(begin: Weekday, end: Weekday) -> WeekdaySet {
        let mut set = WeekdaySet::empty();
        let mut day = begin;
        loop {
            set |= WeekdaySet::day(day);
            if day == end {
                return set;
            }
            day = day.succ();
        }
    }

    pub fn of_ranges(ranges: &[WeekdayRange]) -> WeekdaySet {
        ranges.iter().fold(WeekdaySet::empty(), |set, range| match range {
            WeekdayRange::Single { day, .. } => set | WeekdaySet::day(*day),
            WeekdayRange::Span(begin, end) => set | WeekdaySet::span(*begin, *end),
            WeekdayRange::Holiday(_) => set,
        })
    }

    /// The fewest ranges covering the set, in week order.
    ///
    /// ```text
    /// {Mo, Tu, We, Fr, Su} -> [Mo-We, Fr, Su]
    /// ```
    pub fn ranges(self) -> Vec<WeekdayRange> {
        let mut out = Vec::new();
        let mut run: Option<(Weekday, Weekday)> = None;
        for day in WEEK.into_iter().filter(|d| self.contains(WeekdaySet::day(*d))) {
            run = match run {
                Some((begin, end)) if end.succ() == day => Some((begin, day)),
                Some(done) => {
                    out.push(run_to_range(done));
                    Some((day, day))
                }
                None => Some((day, day)),
            };
        }
        out.extend(run.map(run_to_range));
        out
    }
}

fn run_to_range((begin, end): (Weekday, Weekday)) -> WeekdayRange {
    if begin == end { WeekdayRange::day(begin) } else { WeekdayRange::Span(begin, end) }
}

/// One day/hours group: `PH,Mo-Fr 10:00-12:00,14:00-18:00`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DaysHours {
    pub weekdays: Vec<WeekdayRange>,
    /// Holidays that are valid alongside the weekdays.
    pub holidays: Vec<PublicHoliday>,
    /// Holidays restricted to the weekdays (`PH Sa-Su`).
    pub holiday_filter: Vec<PublicHoliday>,
    pub hours: Vec<HourRange>,
}

impl DaysHours {
    /// Every day, all day.
    pub fn always() -> DaysHours {
        DaysHours { hours: vec![HourRange::ALL_DAY], ..DaysHours::default() }
    }

    /// The group a fresh rule starts with: `Mo-Su 10:00-18:00`.
    pub fn starter() -> DaysHours {
        DaysHours { weekdays: vec![WeekdayRange::EVERY_DAY], hours: vec![HourRange::default()], ..DaysHours::default() }
    }

    pub fn is_24_7(&self) -> bool {
        self.weekdays.is_empty()
            && self.holidays.is_empty()
            && self.holiday_filter.is_empty()
            && matches!(self.hours.as_slice(), [range] if range.is_24_hour() && !range.open_ended)
    }

    pub fn is_empty(&self) -> bool {
        self.has_no_days() && self.hours.is_empty()
    }

    /// No weekday, holiday or holiday filter: the group means "every day".
    pub fn has_no_days(&self) -> bool {
        self.weekdays.is_empty() && self.holidays.is_empty() && self.holiday_filter.is_empty()
    }

    pub fn weekday_set(&self) -> WeekdaySet {
        WeekdaySet::of_ranges(&self.weekdays)
    }

    /// Flip one weekday, rewriting the weekday list as minimal spans.
    ///
    /// An empty list means every day, so the first toggle removes a day from
    /// the full week. Holiday entries in the list are kept.
    pub fn toggle_day(&mut self, day: Weekday) {
        let holidays: Vec<WeekdayRange> =
            self.weekdays.iter().filter(|r| matches!(r, WeekdayRange::Holiday(_))).cloned().collect();

        let mut set = self.weekday_set();
        if set.is_empty() {
            set = WeekdaySet::all();
        }
        set.toggle(WeekdaySet::day(day));

        self.weekdays = if set == WeekdaySet::all() && holidays.is_empty() {
            Vec::new()
        } else {
            let mut ranges = set.ranges();
            ranges.extend(holidays);
            ranges
        };
    }
}

// --- Rules -------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Open,
    Closed,
    Off,
    Unknown,
}

impl Modifier {
    pub const ALL: [Modifier; 4] = [Modifier::Open, Modifier::Closed, Modifier::Off, Modifier::Unknown];

    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Open => "open",
            Modifier::Closed => "closed",
            Modifier::Off => "off",
            Modifier::Unknown => "unknown",
        }
    }
}

/// Free text between double quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    pub text: String,
}

/// How a rule combines with the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSeparator {
    /// `;` independent rule, later rules override earlier ones.
    Semicolon,
    /// `,` same-priority alternative.
    Comma,
    /// `||` fallback rule.
    DoubleBar,
}

impl RuleSeparator {
    pub const ALL: [RuleSeparator; 3] = [RuleSeparator::Semicolon, RuleSeparator::Comma, RuleSeparator::DoubleBar];

    pub fn token(self) -> &'static str {
        match self {
            RuleSeparator::Semicolon => ";",
            RuleSeparator::Comma => ",",
            RuleSeparator::DoubleBar => "||",
        }
    }
}

/// One rule: `Apr-Oct: Sa-Su 10:00-18:00 open "summer"; `.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Rule {
    pub months: Vec<MonthDayRange>,
    pub weeks: Vec<WeekRange>,
    /// A `:` written between the date selectors and the day/hours groups.
    pub readability_separator: bool,
    pub days_hours: Vec<DaysHours>,
    pub modifier: Option<Modifier>,
    pub comment: Option<Comment>,
    pub separator: Option<RuleSeparator>,
}

impl Rule {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
            && self.weeks.is_empty()
            && self.days_hours.is_empty()
            && self.modifier.is_none()
            && self.comment.is_none()
    }

    /// Month or week selectors in front of the groups.
    pub fn has_date_selectors(&self) -> bool {
        !self.months.is_empty() || !self.weeks.is_empty()
    }

    /// Weekdays named by any group of this rule.
    pub fn defined_days(&self) -> WeekdaySet {
        self.days_hours.iter().fold(WeekdaySet::empty(), |set, group| set | group.weekday_set())
    }

    /// Append a group covering the days no other group names yet.
    pub fn add_days_hours(&mut self) {
        let mut group = DaysHours::starter();
        let remaining = WeekdaySet::all() - self.defined_days();
        if remaining != WeekdaySet::all() && !remaining.is_empty() {
            group.weekdays = remaining.ranges();
        }
        self.days_hours.push(group);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RuleList {
    pub rules: Vec<Rule>,
}

impl RuleList {
    /// Append a `Mo-Su 10:00-18:00` rule, joined to the previous one by `;`.
    pub fn push_starter_rule(&mut self) {
        if let Some(last) = self.rules.last_mut() {
            last.separator.get_or_insert(RuleSeparator::Semicolon);
        }
        self.rules.push(Rule { days_hours: vec![DaysHours::starter()], ..Rule::default() });
    }

    /// Bring an edited tree back to a shape whose canonical text parses to
    /// the same tree.
    ///
    /// - empty groups and empty rules are dropped;
    /// - holidays of a group without weekdays become filters;
    /// - a group without days that follows another group names `Mo-Su`;
    /// - a group without hours that precedes another group gets `00:00-24:00`;
    /// - a rule without months or weeks drops its `:`;
    /// - a `,` or missing separator before a rule without months or weeks
    ///   becomes `;`, since that text would read as more groups;
    /// - the last rule carries no separator.
    pub fn tidy(&mut self) {
        for rule in &mut self.rules {
            rule.days_hours.retain(|group| !group.is_empty());
            let count = rule.days_hours.len();
            for (index, group) in rule.days_hours.iter_mut().enumerate() {
                if group.weekdays.is_empty() {
                    let holidays = std::mem::take(&mut group.holidays);
                    group.holiday_filter.extend(holidays);
                }
                if index > 0 && group.has_no_days() {
                    group.weekdays.push(WeekdayRange::EVERY_DAY);
                }
                if index + 1 < count && group.hours.is_empty() {
                    group.hours.push(HourRange::ALL_DAY);
                }
            }
            if !rule.has_date_selectors() {
                rule.readability_separator = false;
            }
        }
        self.rules.retain(|rule| !rule.is_empty());

        let starts: Vec<bool> = self.rules.iter().map(Rule::has_date_selectors).collect();
        for (rule, next_has_dates) in self.rules.iter_mut().zip(starts.into_iter().skip(1)) {
            if !next_has_dates && matches!(rule.separator, None | Some(RuleSeparator::Comma)) {
                rule.separator = Some(RuleSeparator::Semicolon);
            }
        }
        if let Some(last) = self.rules.last_mut() {
            last.separator = None;
        }
    }
}
