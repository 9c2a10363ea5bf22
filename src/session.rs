//! Caller-owned state for one vehicle's availability calendar.

use tracing::{debug, info, warn};

use crate::grid::{CalendarOptions, MonthView, YearMonth, render_month};
use crate::pricing::{PriceQuote, PricingError, Rates, quote};
use crate::{CalendarDate, ParseError, RangeBlockedError, SelectionState, UnavailableSet, Vehicle};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    RangeBlocked(#[from] RangeBlockedError),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// The date picker for whichever vehicle is currently open.
///
/// Holds the selection, the visible month and the vehicle data the selection
/// is checked and priced against. Switching vehicles always discards the
/// current selection.
#[derive(Debug, Clone)]
pub struct AvailabilitySession {
    vehicle_id:  String,
    rates:       Rates,
    unavailable: UnavailableSet,
    state:       SelectionState,
    visible:     YearMonth,
    today:       CalendarDate,
    options:     CalendarOptions,
}

impl AvailabilitySession {
    /// Opens an empty session on `vehicle`, showing the month containing `today`.
    ///
    /// # Errors
    /// Returns `SessionError::Pricing` if the vehicle lists a negative rate.
    pub fn new(
        vehicle: &Vehicle,
        today: CalendarDate,
        options: CalendarOptions,
    ) -> Result<Self, SessionError> {
        let session = Self {
            vehicle_id: vehicle.id.clone(),
            rates: vehicle.rates()?,
            unavailable: vehicle.unavailable_dates.clone(),
            state: SelectionState::Empty,
            visible: YearMonth::of(&today),
            today,
            options,
        };
        info!(vehicle = %session.vehicle_id, %today, "opened availability calendar");
        Ok(session)
    }

    /// Returns the id of the vehicle being booked.
    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    /// Returns the current selection.
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Returns the vehicle's daily and weekly rates.
    pub const fn rates(&self) -> &Rates {
        &self.rates
    }

    /// Returns the vehicle's blacked-out days.
    pub const fn unavailable(&self) -> &UnavailableSet {
        &self.unavailable
    }

    /// Returns the month currently shown.
    pub const fn visible_month(&self) -> YearMonth {
        self.visible
    }

    /// Returns the day the session treats as today.
    pub const fn today(&self) -> CalendarDate {
        self.today
    }

    /// Moves the session to another vehicle, resetting selection and month.
    ///
    /// On error the session is left untouched.
    ///
    /// # Errors
    /// Returns `SessionError::Pricing` if the new vehicle lists a negative rate.
    pub fn switch_vehicle(&mut self, vehicle: &Vehicle) -> Result<(), SessionError> {
        let rates = vehicle.rates()?;
        info!(
            from = %self.vehicle_id,
            to = %vehicle.id,
            "switching vehicle, clearing selection"
        );
        self.vehicle_id.clone_from(&vehicle.id);
        self.rates = rates;
        self.unavailable.clone_from(&vehicle.unavailable_dates);
        self.state = SelectionState::Empty;
        self.visible = YearMonth::of(&self.today);
        Ok(())
    }

    /// Handles a click on `date`.
    ///
    /// # Errors
    /// Returns `RangeBlockedError` if the proposed range crosses a blacked-out
    /// day; the selection is unchanged.
    pub fn select_day(&mut self, date: CalendarDate) -> Result<&SelectionState, RangeBlockedError> {
        match self.state.select_day(date, &self.unavailable) {
            Ok(next) => {
                debug!(vehicle = %self.vehicle_id, %date, from = ?self.state, to = ?next, "selection changed");
                self.state = next;
                Ok(&self.state)
            }
            Err(err) => {
                warn!(vehicle = %self.vehicle_id, blocking = %err.blocking_date, "range blocked");
                Err(err)
            }
        }
    }

    /// [`select_day`](Self::select_day) for a `YYYY-MM-DD` string from the surface.
    ///
    /// # Errors
    /// Returns `SessionError::Parse` for a malformed date, otherwise as `select_day`.
    pub fn select_day_str(&mut self, date: &str) -> Result<&SelectionState, SessionError> {
        let date = date.parse::<CalendarDate>()?;
        Ok(self.select_day(date)?)
    }

    /// Drops any selection and returns the empty state.
    pub fn clear(&mut self) -> &SelectionState {
        debug!(vehicle = %self.vehicle_id, "selection cleared");
        self.state = SelectionState::Empty;
        &self.state
    }

    /// Price of the selected range, `None` until both dates are picked.
    pub fn current_quote(&self) -> Option<PriceQuote> {
        self.state.range().map(|range| quote(&range, &self.rates))
    }

    /// Grid for the visible month.
    pub fn render_month(&self) -> MonthView {
        self.render(self.visible)
    }

    /// Grid for an arbitrary month under the current selection.
    pub fn render(&self, month: YearMonth) -> MonthView {
        render_month(
            month,
            &self.state,
            &self.unavailable,
            self.today,
            self.options.week_start,
        )
    }

    /// Steps forward one month and returns the month now shown.
    pub fn next_month(&mut self) -> YearMonth {
        if let Some(next) = self.visible.next() {
            self.visible = next;
        }
        debug!(month = %self.visible, "navigated forward");
        self.visible
    }

    /// Steps back one month. Stops at the month containing today unless
    /// `allow_past_navigation` is set.
    pub fn previous_month(&mut self) -> YearMonth {
        let floor = YearMonth::of(&self.today);
        match self.visible.prev() {
            Some(prev) if self.options.allow_past_navigation || prev >= floor => {
                self.visible = prev;
            }
            _ => {}
        }
        debug!(month = %self.visible, "navigated back");
        self.visible
    }

    /// Returns true when `previous_month` would move.
    pub const fn can_go_back(&self) -> bool {
        if self.options.allow_past_navigation {
            return true;
        }
        let floor = YearMonth::of(&self.today);
        self.visible.year() > floor.year()
            || (self.visible.year() == floor.year() && self.visible.month() > floor.month())
    }
}
