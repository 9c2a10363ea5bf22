//! Two-click pickup/return selection.
//!
//! The first click anchors a pickup date, the second proposes a return date.
//! A proposed range whose interior crosses a blacked-out day is rejected and
//! the pickup stays anchored.

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, RentalRange, UnavailableSet};

/// Where the user is in picking a rental range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SelectionState {
    #[default]
    Empty,
    PickupOnly { pickup: CalendarDate },
    Range { range: RentalRange },
}

/// A return date was proposed whose range interior contains a blacked-out day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error(
    "Cannot rent from {pickup} to {attempted_return}: vehicle is unavailable on {blocking_date}"
)]
pub struct RangeBlockedError {
    pub pickup:           CalendarDate,
    pub attempted_return: CalendarDate,
    pub blocking_date:    CalendarDate,
}

impl SelectionState {
    /// Applies one day click.
    ///
    /// `clicked` is assumed to be selectable (not past, not blacked out);
    /// only the interior of a proposed range is checked here.
    ///
    /// # Errors
    /// Returns `RangeBlockedError` when a pickup is anchored and the range up
    /// to `clicked` crosses an unavailable day. The caller keeps its current
    /// state in that case.
    pub fn select_day(
        self,
        clicked: CalendarDate,
        unavailable: &UnavailableSet,
    ) -> Result<Self, RangeBlockedError> {
        match self {
            Self::Empty | Self::Range { .. } => Ok(Self::PickupOnly { pickup: clicked }),
            Self::PickupOnly { pickup } if clicked == pickup => Ok(Self::Empty),
            Self::PickupOnly { pickup } if clicked < pickup => {
                Ok(Self::PickupOnly { pickup: clicked })
            }
            Self::PickupOnly { pickup } => {
                if let Some(blocking_date) = unavailable.first_between(pickup, clicked) {
                    return Err(RangeBlockedError {
                        pickup,
                        attempted_return: clicked,
                        blocking_date,
                    });
                }
                // clicked > pickup here, so the range is well formed.
                Ok(RentalRange::new(pickup, clicked).map_or(self, |range| Self::Range { range }))
            }
        }
    }

    /// Returns the pickup date, if one is chosen.
    pub const fn pickup(&self) -> Option<CalendarDate> {
        match self {
            Self::Empty => None,
            Self::PickupOnly { pickup } => Some(*pickup),
            Self::Range { range } => Some(range.pickup()),
        }
    }

    /// Returns the return date once a full range is chosen.
    pub const fn return_date(&self) -> Option<CalendarDate> {
        match self {
            Self::Range { range } => Some(range.return_date()),
            Self::Empty | Self::PickupOnly { .. } => None,
        }
    }

    /// Returns the completed range, if any.
    pub const fn range(&self) -> Option<RentalRange> {
        match self {
            Self::Range { range } => Some(*range),
            Self::Empty | Self::PickupOnly { .. } => None,
        }
    }

    /// Returns true when nothing is selected.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{blackout, date};

    fn click_all(dates: &[&str], unavailable: &UnavailableSet) -> SelectionState {
        dates.iter().fold(SelectionState::Empty, |state, d| {
            state.select_day(date(d), unavailable).unwrap_or(state)
        })
    }

    #[test]
    fn test_first_click_anchors_pickup() {
        let state = click_all(&["2024-06-01"], &UnavailableSet::new());
        assert_eq!(
            state,
            SelectionState::PickupOnly {
                pickup: date("2024-06-01")
            }
        );
        assert_eq!(state.pickup(), Some(date("2024-06-01")));
        assert_eq!(state.return_date(), None);
    }

    #[test]
    fn test_same_day_twice_deselects() {
        let state = click_all(&["2024-06-01", "2024-06-01"], &UnavailableSet::new());
        assert!(state.is_empty());
    }

    #[test]
    fn test_earlier_click_reanchors_pickup() {
        let state = click_all(&["2024-06-10", "2024-06-03"], &UnavailableSet::new());
        assert_eq!(
            state,
            SelectionState::PickupOnly {
                pickup: date("2024-06-03")
            }
        );
    }

    #[test]
    fn test_later_click_completes_range() {
        let state = click_all(&["2024-06-01", "2024-06-10"], &UnavailableSet::new());
        let range = state.range().unwrap();
        assert_eq!(range.pickup(), date("2024-06-01"));
        assert_eq!(range.return_date(), date("2024-06-10"));
    }

    #[test]
    fn test_blocked_interior_is_rejected() {
        let unavailable = blackout(&["2024-06-05"]);
        let anchored = SelectionState::Empty
            .select_day(date("2024-06-01"), &unavailable)
            .unwrap();

        let err = anchored
            .select_day(date("2024-06-10"), &unavailable)
            .unwrap_err();
        assert_eq!(
            err,
            RangeBlockedError {
                pickup:           date("2024-06-01"),
                attempted_return: date("2024-06-10"),
                blocking_date:    date("2024-06-05"),
            }
        );
        assert_eq!(
            err.to_string(),
            "Cannot rent from 2024-06-01 to 2024-06-10: vehicle is unavailable on 2024-06-05"
        );

        // The caller keeps the anchored pickup.
        assert_eq!(anchored.pickup(), Some(date("2024-06-01")));
    }

    #[test]
    fn test_blocked_reports_earliest_blocking_day() {
        let unavailable = blackout(&["2024-06-08", "2024-06-04"]);
        let err = SelectionState::PickupOnly {
            pickup: date("2024-06-01"),
        }
        .select_day(date("2024-06-10"), &unavailable)
        .unwrap_err();
        assert_eq!(err.blocking_date, date("2024-06-04"));
    }

    #[test]
    fn test_blackout_on_range_ends_is_not_interior() {
        let unavailable = blackout(&["2024-06-01", "2024-06-10"]);
        let state = SelectionState::PickupOnly {
            pickup: date("2024-06-01"),
        }
        .select_day(date("2024-06-10"), &unavailable)
        .unwrap();
        assert!(state.range().is_some());
    }

    #[test]
    fn test_click_after_range_starts_over() {
        let state = click_all(
            &["2024-06-01", "2024-06-10", "2024-06-20"],
            &UnavailableSet::new(),
        );
        assert_eq!(
            state,
            SelectionState::PickupOnly {
                pickup: date("2024-06-20")
            }
        );

        let earlier = click_all(
            &["2024-06-01", "2024-06-10", "2024-05-20"],
            &UnavailableSet::new(),
        );
        assert_eq!(earlier.pickup(), Some(date("2024-05-20")));
        assert_eq!(earlier.return_date(), None);
    }

    #[test]
    fn test_unblocked_pairs_always_form_a_range() {
        let unavailable = blackout(&["2024-06-15"]);
        let pickups = ["2024-06-01", "2024-06-10", "2024-06-15"];
        let returns = ["2024-06-02", "2024-06-14", "2024-06-15", "2024-06-30"];

        for p in pickups {
            for r in returns {
                let (p, r) = (date(p), date(r));
                if p >= r {
                    continue;
                }
                let result = SelectionState::PickupOnly { pickup: p }.select_day(r, &unavailable);
                match unavailable.first_between(p, r) {
                    Some(u) => assert_eq!(result.unwrap_err().blocking_date, u),
                    None => assert_eq!(
                        result.unwrap().range(),
                        Some(RentalRange::new(p, r).unwrap())
                    ),
                }
            }
        }
    }

    #[test]
    fn test_serde_shape() {
        let state = SelectionState::PickupOnly {
            pickup: date("2024-06-01"),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"state":"pickupOnly","pickup":"2024-06-01"}"#);
        let parsed: SelectionState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
