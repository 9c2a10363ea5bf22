//! Per-vehicle blacked-out days.

use std::collections::BTreeSet;
use std::ops::Bound;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, ParseError};

/// Days on which a vehicle cannot be rented.
///
/// Deserialises from the catalog's `unavailableDates` array of `YYYY-MM-DD`
/// strings. The set is read-only once a selection session starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnavailableSet(BTreeSet<CalendarDate>);

impl UnavailableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every entry as a strict ISO date.
    ///
    /// # Errors
    /// Returns the first `ParseError` encountered.
    pub fn from_iso_strings<I, S>(dates: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        dates
            .into_iter()
            .map(|s| s.as_ref().parse::<CalendarDate>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.0.contains(date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarDate> {
        self.0.iter()
    }

    /// Earliest blacked-out day strictly between `after` and `before`.
    pub fn first_between(&self, after: CalendarDate, before: CalendarDate) -> Option<CalendarDate> {
        // BTreeSet::range panics on an inverted or empty-exclusive range.
        if after >= before {
            return None;
        }
        self.0
            .range((Bound::Excluded(after), Bound::Excluded(before)))
            .next()
            .copied()
    }
}

impl FromIterator<CalendarDate> for UnavailableSet {
    fn from_iter<T: IntoIterator<Item = CalendarDate>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{blackout, date};

    #[test]
    fn test_from_iso_strings() {
        let set = blackout(&["2024-06-05", "2024-06-07", "2024-06-05"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&date("2024-06-05")));
        assert!(!set.contains(&date("2024-06-06")));

        let result = UnavailableSet::from_iso_strings(["2024-06-05", "June 7"]);
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_first_between_is_exclusive() {
        let set = blackout(&["2024-06-05", "2024-06-08"]);

        assert_eq!(
            set.first_between(date("2024-06-01"), date("2024-06-10")),
            Some(date("2024-06-05"))
        );
        assert_eq!(
            set.first_between(date("2024-06-05"), date("2024-06-08")),
            None
        );
        assert_eq!(
            set.first_between(date("2024-06-05"), date("2024-06-09")),
            Some(date("2024-06-08"))
        );
    }

    #[test]
    fn test_first_between_degenerate_bounds() {
        let set = blackout(&["2024-06-05"]);
        assert_eq!(
            set.first_between(date("2024-06-05"), date("2024-06-05")),
            None
        );
        assert_eq!(
            set.first_between(date("2024-06-10"), date("2024-06-01")),
            None
        );
    }

    #[test]
    fn test_deserialize_from_json_array() {
        let set: UnavailableSet = serde_json::from_str(r#"["2024-06-07", "2024-06-05"]"#).unwrap();
        let ordered: Vec<String> = set.iter().map(ToString::to_string).collect();
        assert_eq!(ordered, vec!["2024-06-05", "2024-06-07"]);

        assert!(serde_json::from_str::<UnavailableSet>(r#"["2024-13-01"]"#).is_err());
    }
}
