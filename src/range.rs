use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, ParseError, RANGE_SEPARATOR, prelude::*};

/// A pickup/return pair with `pickup < return_date`.
///
/// Both ends are part of the rental; the billed duration is the number of
/// nights between them, so a same-day range is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "{pickup}/{return_date}")]
pub struct RentalRange {
    pickup:      CalendarDate,
    return_date: CalendarDate,
}

/// Error type for rental range construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Return date is not after the pickup date.
    #[error("Invalid rental range: return ({return_date}) must be after pickup ({pickup})")]
    NotAfterPickup {
        pickup:      CalendarDate,
        return_date: CalendarDate,
    },

    /// Error parsing a date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl RentalRange {
    /// # Errors
    /// Returns `RangeError::NotAfterPickup` if `return_date <= pickup`.
    pub fn new(pickup: CalendarDate, return_date: CalendarDate) -> Result<Self, RangeError> {
        if return_date <= pickup {
            return Err(RangeError::NotAfterPickup {
                pickup,
                return_date,
            });
        }
        Ok(Self {
            pickup,
            return_date,
        })
    }

    pub const fn pickup(&self) -> CalendarDate {
        self.pickup
    }

    pub const fn return_date(&self) -> CalendarDate {
        self.return_date
    }

    /// Whole days between pickup and return; always at least 1.
    pub fn duration_days(&self) -> u32 {
        // pickup < return_date and both lie within 1..=9999, so this fits.
        u32::try_from(self.pickup.days_until(&self.return_date)).unwrap_or(u32::MAX)
    }

    /// True if `date` lies strictly between the pickup and return dates.
    pub fn contains_interior(&self, date: &CalendarDate) -> bool {
        self.pickup < *date && *date < self.return_date
    }
}

impl FromStr for RentalRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((pickup, return_date)) = s.split_once(RANGE_SEPARATOR) else {
            return Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            )));
        };
        if return_date.contains(RANGE_SEPARATOR) {
            return Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: {s}"
            )));
        }

        Self::new(pickup.parse()?, return_date.parse()?)
    }
}

impl Serialize for RentalRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RentalRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
