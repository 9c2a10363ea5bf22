//! Month grids for the calendar surface.

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::types::days_in_month;
use crate::{
    CalendarDate, DECEMBER, JANUARY, MIN_DAY, Month, ParseError, SelectionState, UnavailableSet,
    Weekday, Year,
};

/// A displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}-{}", year, month)]
pub struct YearMonth {
    year:  Year,
    month: Month,
}

impl YearMonth {
    /// # Errors
    /// Returns `ParseError` if the year or month is out of range.
    pub fn new(year: u16, month: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
        })
    }

    pub const fn of(date: &CalendarDate) -> Self {
        Self {
            year:  date.year_typed(),
            month: date.month_typed(),
        }
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn days(&self) -> u8 {
        days_in_month(self.year(), self.month())
    }

    /// "June 2024"
    pub fn title(&self) -> String {
        format!("{} {}", self.month.name(), self.year())
    }

    pub const fn first_day(&self) -> CalendarDate {
        CalendarDate::first_of(self.year, self.month)
    }

    /// The following month, `None` past the last supported year.
    pub fn next(&self) -> Option<Self> {
        if self.month() == DECEMBER {
            Self::new(self.year().checked_add(1)?, JANUARY).ok()
        } else {
            Self::new(self.year(), self.month() + 1).ok()
        }
    }

    /// The preceding month, `None` before year 1.
    pub fn prev(&self) -> Option<Self> {
        if self.month() == JANUARY {
            Self::new(self.year().checked_sub(1)?, DECEMBER).ok()
        } else {
            Self::new(self.year(), self.month() - 1).ok()
        }
    }

    /// Every day of the month in order.
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> {
        let (year, month) = (self.year, self.month);
        (MIN_DAY..=self.days()).filter_map(move |day| CalendarDate::new(year, month, day).ok())
    }
}

/// Calendar display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarOptions {
    /// Column the grid starts on
    pub week_start:            Weekday,
    /// Let navigation go before the month containing today
    pub allow_past_navigation: bool,
}

/// Display state of a single day.
///
/// `past` and `unavailable` days are not clickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayFlags {
    pub past:           bool,
    pub unavailable:    bool,
    pub selected_start: bool,
    pub selected_end:   bool,
    pub in_range:       bool,
    pub today:          bool,
}

impl DayFlags {
    pub const fn is_clickable(&self) -> bool {
        !self.past && !self.unavailable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DayCell {
    /// Padding before the first day of the month
    Blank,
    Day { date: CalendarDate, flags: DayFlags },
}

impl DayCell {
    pub const fn date(&self) -> Option<CalendarDate> {
        match self {
            Self::Blank => None,
            Self::Day { date, .. } => Some(*date),
        }
    }

    pub const fn is_clickable(&self) -> bool {
        match self {
            Self::Blank => false,
            Self::Day { flags, .. } => flags.is_clickable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthView {
    pub month:      YearMonth,
    pub week_start: Weekday,
    pub cells:      Vec<DayCell>,
}

impl MonthView {
    /// Cells split into rows of seven; the last row may be short.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    /// Column headers in grid order.
    pub fn weekday_headers(&self) -> [Weekday; 7] {
        let start = self.week_start.sunday_index();
        std::array::from_fn(|i| Weekday::from_sunday_index(start + i as u32))
    }
}

/// Lays out `month` with every day tagged for the current selection.
pub fn render_month(
    month: YearMonth,
    state: &SelectionState,
    unavailable: &UnavailableSet,
    today: CalendarDate,
    week_start: Weekday,
) -> MonthView {
    let leading = month.first_day().weekday().offset_from(week_start) as usize;
    let pickup = state.pickup();
    let return_date = state.return_date();
    let range = state.range();

    let days = month.dates().map(|date| DayCell::Day {
        date,
        flags: DayFlags {
            past:           date < today,
            unavailable:    unavailable.contains(&date),
            selected_start: pickup == Some(date),
            selected_end:   return_date == Some(date),
            in_range:       range.is_some_and(|r| r.contains_interior(&date)),
            today:          date == today,
        },
    });

    let mut cells = Vec::with_capacity(leading + usize::from(month.days()));
    cells.extend(std::iter::repeat_n(DayCell::Blank, leading));
    cells.extend(days);

    MonthView {
        month,
        week_start,
        cells,
    }
}
