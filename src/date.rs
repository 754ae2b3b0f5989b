//! Calendar dates without a time-of-day component, plus the range bound and
//! the plain date record handed to callbacks.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::successors;
use std::str::FromStr;
use thiserror::Error;
use time::{
    format_description::BorrowedFormatItem, macros::format_description,
    Date, Duration, Month, OffsetDateTime, Weekday,
};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub const DAYS_IN_WEEK: usize = 7;

pub trait WeekdayExt {
    /// Index of the weekday counting from Sunday = 0
    fn index0(&self) -> u8;

    /// Weekday for a Sunday-based index; values past 6 wrap around
    fn from_index0(index: u8) -> Self;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }

    fn from_index0(index: u8) -> Weekday {
        Weekday::Sunday.nth_next(index % 7)
    }
}

/// An immutable (year, month, day) triple.  Invalid calendar dates cannot be
/// constructed.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CalendarDate(Date);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<CalendarDate, ParseDateError> {
        let m = Month::try_from(month).map_err(|_| ParseDateError::Month(month))?;
        Date::from_calendar_date(year, m, day)
            .map(CalendarDate)
            .map_err(|_| ParseDateError::Day { year, month, day })
    }

    /// Today's date in the local timezone, or in UTC if the local offset
    /// cannot be determined
    pub fn today() -> CalendarDate {
        match OffsetDateTime::now_local() {
            Ok(now) => CalendarDate(now.date()),
            Err(e) => {
                tracing::warn!(error = %e, "local offset unavailable; using UTC for today");
                CalendarDate(OffsetDateTime::now_utc().date())
            }
        }
    }

    /// Parses an optional input date, treating anything malformed as absent
    pub fn parse_lenient(s: &str) -> Option<CalendarDate> {
        match s.parse::<CalendarDate>() {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(input = s, error = %e, "ignoring malformed date");
                None
            }
        }
    }

    pub fn as_date(&self) -> Date {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month number, 1 through 12
    pub fn month(&self) -> u8 {
        self.0.month().into()
    }

    pub fn day(&self) -> u8 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// ISO 8601 week number
    pub fn week_of_year(&self) -> u8 {
        self.0.iso_week()
    }

    pub fn is_before(&self, other: CalendarDate) -> bool {
        *self < other
    }

    pub fn is_after(&self, other: CalendarDate) -> bool {
        *self > other
    }

    pub fn is_same_or_before(&self, other: CalendarDate) -> bool {
        *self <= other
    }

    pub fn is_same_or_after(&self, other: CalendarDate) -> bool {
        *self >= other
    }

    pub fn is_same_date(&self, other: CalendarDate) -> bool {
        *self == other
    }

    pub fn is_same_month(&self, other: CalendarDate) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    /// Shifts by `n` months, clamping the day to the length of the target
    /// month so that e.g. January 31 plus one month is the last day of
    /// February.  Saturates at the ends of the representable range.
    pub fn add_months(&self, n: i32) -> CalendarDate {
        let total = i64::from(self.year()) * 12 + i64::from(self.month() - 1) + i64::from(n);
        let Ok(year) = i32::try_from(total.div_euclid(12)) else {
            return self.saturate(n);
        };
        let Some(month) = u8::try_from(total.rem_euclid(12) + 1)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
        else {
            return self.saturate(n);
        };
        let day = self.day().min(month.length(year));
        Date::from_calendar_date(year, month, day).map_or_else(|_| self.saturate(n), CalendarDate)
    }

    /// Shifts by `n` days, saturating at the ends of the representable range
    pub fn add_days(&self, n: i64) -> CalendarDate {
        CalendarDate(self.0.saturating_add(Duration::days(n)))
    }

    /// Replaces the day of the month, clamping to the month's length
    pub fn set_day(&self, day: u8) -> CalendarDate {
        let day = day.clamp(1, self.month_length());
        self.0.replace_day(day).map_or(*self, CalendarDate)
    }

    pub fn first_of_month(&self) -> CalendarDate {
        self.set_day(1)
    }

    pub fn last_of_month(&self) -> CalendarDate {
        self.set_day(self.month_length())
    }

    pub fn next_day(&self) -> Option<CalendarDate> {
        self.0.next_day().map(CalendarDate)
    }

    pub fn previous_day(&self) -> Option<CalendarDate> {
        self.0.previous_day().map(CalendarDate)
    }

    /// Milliseconds since the Unix epoch at midnight UTC of this date
    pub fn timestamp_millis(&self) -> i64 {
        self.0.midnight().assume_utc().unix_timestamp() * 1000
    }

    fn month_length(&self) -> u8 {
        self.0.month().length(self.year())
    }

    fn saturate(&self, n: i32) -> CalendarDate {
        if n < 0 {
            CalendarDate(Date::MIN)
        } else {
            CalendarDate(Date::MAX)
        }
    }
}

impl From<Date> for CalendarDate {
    fn from(date: Date) -> CalendarDate {
        CalendarDate(date)
    }
}

impl fmt::Display for CalendarDate {
    /// The ISO `yyyy-MM-dd` key used by marking maps
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(&YMD_FMT).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl FromStr for CalendarDate {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<CalendarDate, ParseDateError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseDateError::Empty);
        }
        Date::parse(s, &YMD_FMT)
            .map(CalendarDate)
            .map_err(|_| ParseDateError::Format(s.to_owned()))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<CalendarDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// `deserialize_with` helper for optional dates: anything malformed is
/// treated as absent instead of failing the whole configuration.
pub(crate) fn deserialize_lenient<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<CalendarDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(CalendarDate::parse_lenient))
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseDateError {
    #[error("empty date string")]
    Empty,
    #[error("invalid date format {0:?}, expected YYYY-MM-DD")]
    Format(String),
    #[error("invalid month {0} (must be 1-12)")]
    Month(u8),
    #[error("invalid day {day} for month {year}-{month:02}")]
    Day { year: i32, month: u8, day: u8 },
}

/// Optional minimum and maximum dates, both inclusive
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DateRange {
    pub min: Option<CalendarDate>,
    pub max: Option<CalendarDate>,
}

impl DateRange {
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> DateRange {
        DateRange { min, max }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.min.is_none_or(|min| date.is_same_or_after(min))
            && self.max.is_none_or(|max| date.is_same_or_before(max))
    }
}

/// The plain date record passed to every notification and interaction
/// callback
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateData {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub date_string: String,
    pub timestamp: i64,
}

impl From<CalendarDate> for DateData {
    fn from(date: CalendarDate) -> DateData {
        DateData {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            date_string: date.to_string(),
            timestamp: date.timestamp_millis(),
        }
    }
}

pub(crate) fn iter_days_after(date: CalendarDate) -> impl Iterator<Item = CalendarDate> {
    successors(Some(date), CalendarDate::next_day).skip(1)
}

pub(crate) fn iter_days_before(date: CalendarDate) -> impl Iterator<Item = CalendarDate> {
    successors(Some(date), CalendarDate::previous_day).skip(1)
}
