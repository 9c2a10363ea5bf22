mod consts;
mod prelude;
mod range;
mod types;

pub mod blackout;
pub mod catalog;
pub mod grid;
pub mod pricing;
pub mod reviews;
pub mod selection;
pub mod session;

pub use blackout::UnavailableSet;
pub use catalog::{Catalog, CatalogError, Vehicle, VehicleFilter};
pub use consts::*;
pub use grid::{CalendarOptions, DayCell, DayFlags, MonthView, YearMonth, render_month};
pub use pricing::{PriceQuote, PricingError, Rates, format_usd, quote};
pub use range::{RangeError, RentalRange};
pub use reviews::{Rating, Review, StarBreakdown};
pub use selection::{RangeBlockedError, SelectionState};
pub use session::{AvailabilitySession, SessionError};
pub use types::{Day, Month, Weekday, Year};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

/// A single calendar day with no time-of-day component.
///
/// Ordering and equality are by calendar day only. The textual form is the
/// strict, zero-padded `YYYY-MM-DD` used by the catalog data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}-{}-{}", year, month, day)]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0} (expected YYYY-MM-DD)")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    YearOutOfRange(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date from typed components.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if `day` does not exist in that month.
    pub fn new(year: Year, month: Month, day: u8) -> Result<Self, ParseError> {
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from raw numbers, validating each component.
    ///
    /// # Errors
    /// Returns the `ParseError` variant naming the first invalid component.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Self::new(Year::new(year)?, Month::new(month)?, day)
    }

    pub(crate) const fn first_of(year: Year, month: Month) -> Self {
        Self {
            year,
            month,
            day: Day::FIRST,
        }
    }

    /// The current local calendar day.
    ///
    /// # Errors
    /// Fails only if the system clock reports a year outside `1..=MAX_YEAR`.
    pub fn today() -> Result<Self, ParseError> {
        Self::try_from(chrono::Local::now().date_naive())
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Whole days from `self` to `other`; negative when `other` is earlier.
    pub fn days_until(&self, other: &Self) -> i64 {
        other.naive().signed_duration_since(self.naive()).num_days()
    }

    /// The following day, `None` after `MAX_YEAR`-12-31.
    pub fn succ(&self) -> Option<Self> {
        self.naive().succ_opt().and_then(|d| Self::try_from(d).ok())
    }

    /// The preceding day, `None` before 0001-01-01.
    pub fn pred(&self) -> Option<Self> {
        self.naive().pred_opt().and_then(|d| Self::try_from(d).ok())
    }

    pub fn weekday(&self) -> Weekday {
        Weekday::from_sunday_index(self.naive().weekday().num_days_from_sunday())
    }

    /// Long en-US form used on review cards, e.g. "June 1, 2024".
    pub fn long_format(&self) -> String {
        format!("{} {}, {}", self.month.name(), self.day(), self.year())
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let invalid = || ParseError::InvalidFormat(s.to_owned());
        if s.len() != ISO_DATE_LEN {
            return Err(invalid());
        }

        let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(invalid());
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(invalid());
        }

        let year = Self::parse_digits::<u16>(year).ok_or_else(invalid)?;
        let month = Self::parse_digits::<u8>(month).ok_or_else(invalid)?;
        let day = Self::parse_digits::<u8>(day).ok_or_else(invalid)?;

        Self::from_ymd(year, month, day)
    }
}

impl CalendarDate {
    // Every CalendarDate lies well inside chrono's supported range.
    fn naive(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(
            i32::from(self.year()),
            u32::from(self.month()),
            u32::from(self.day()),
        )
        .unwrap_or_default()
    }

    /// `str::parse` accepts a leading `+`; dates never carry one.
    fn parse_digits<T: FromStr>(s: &str) -> Option<T> {
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok()
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year =
            u16::try_from(date.year()).map_err(|_| ParseError::YearOutOfRange(date.year()))?;
        // chrono months and days always fit in a u8
        Self::from_ymd(year, date.month() as u8, date.day() as u8)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
