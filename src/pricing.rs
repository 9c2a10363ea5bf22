//! Rental price quoting.
//!
//! Whole weeks are billed at the weekly rate and the leftover days at the
//! daily rate. All amounts are exact decimals in the catalog's currency.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{DAYS_PER_WEEK, RentalRange};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Negative {kind} rate: {amount}")]
    NegativeRate { kind: &'static str, amount: Decimal },
}

/// Daily and weekly rates for one vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRates")]
pub struct Rates {
    daily:  Decimal,
    weekly: Decimal,
}

#[derive(Deserialize)]
struct RawRates {
    daily:  Decimal,
    weekly: Decimal,
}

impl TryFrom<RawRates> for Rates {
    type Error = PricingError;

    fn try_from(raw: RawRates) -> Result<Self, Self::Error> {
        Self::new(raw.daily, raw.weekly)
    }
}

impl Rates {
    /// # Errors
    /// Returns `PricingError::NegativeRate` if either rate is below zero.
    pub fn new(daily: Decimal, weekly: Decimal) -> Result<Self, PricingError> {
        if daily.is_sign_negative() && !daily.is_zero() {
            return Err(PricingError::NegativeRate {
                kind:   "daily",
                amount: daily,
            });
        }
        if weekly.is_sign_negative() && !weekly.is_zero() {
            return Err(PricingError::NegativeRate {
                kind:   "weekly",
                amount: weekly,
            });
        }
        Ok(Self { daily, weekly })
    }

    pub const fn daily(&self) -> Decimal {
        self.daily
    }

    pub const fn weekly(&self) -> Decimal {
        self.weekly
    }
}

/// Price for a selected range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub duration_days: u32,
    pub total_price:   Decimal,
}

/// Quotes `range` at `rates`.
pub fn quote(range: &RentalRange, rates: &Rates) -> PriceQuote {
    quote_days(range.duration_days(), rates)
}

/// Quotes a stay of `duration_days` nights.
pub fn quote_days(duration_days: u32, rates: &Rates) -> PriceQuote {
    let total_price = if duration_days >= DAYS_PER_WEEK {
        let weeks = duration_days / DAYS_PER_WEEK;
        let days = duration_days % DAYS_PER_WEEK;
        Decimal::from(weeks) * rates.weekly + Decimal::from(days) * rates.daily
    } else {
        Decimal::from(duration_days) * rates.daily
    };

    PriceQuote {
        duration_days,
        total_price,
    }
}

/// Formats an amount as en-US dollars, e.g. `$1,234.50`.
pub fn format_usd(amount: Decimal) -> String {
    let cents = amount.round_dp(2);
    let sign = if cents.is_sign_negative() && !cents.is_zero() {
        "-"
    } else {
        ""
    };
    let plain = format!("{:.2}", cents.abs());
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, rates};

    fn range(pickup: &str, return_date: &str) -> RentalRange {
        RentalRange::new(date(pickup), date(return_date)).unwrap()
    }

    #[test]
    fn test_quote_cases() {
        struct TestCase {
            duration:    u32,
            expected:    i64,
            description: &'static str,
        }

        let cases = [
            TestCase {
                duration:    1,
                expected:    50,
                description: "single day is the daily rate",
            },
            TestCase {
                duration:    6,
                expected:    300,
                description: "under a week is daily only",
            },
            TestCase {
                duration:    7,
                expected:    300,
                description: "exactly a week is the weekly rate",
            },
            TestCase {
                duration:    9,
                expected:    400,
                description: "one week plus two days",
            },
            TestCase {
                duration:    14,
                expected:    600,
                description: "two whole weeks",
            },
            TestCase {
                duration:    20,
                expected:    900,
                description: "two weeks plus six days",
            },
        ];

        let r = rates(50, 300);
        for case in &cases {
            let q = quote_days(case.duration, &r);
            assert_eq!(q.duration_days, case.duration, "{}", case.description);
            assert_eq!(
                q.total_price,
                Decimal::from(case.expected),
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_quote_for_range() {
        let q = quote(&range("2024-06-01", "2024-06-10"), &rates(50, 300));
        assert_eq!(q.duration_days, 9);
        assert_eq!(q.total_price, Decimal::from(400));
    }

    #[test]
    fn test_quote_is_pure() {
        let r = range("2024-06-01", "2024-06-24");
        let rates = rates(89, 549);
        assert_eq!(quote(&r, &rates), quote(&r, &rates));
    }

    #[test]
    fn test_quote_keeps_fractional_rates_exact() {
        let r = Rates::new(Decimal::new(4999, 2), Decimal::new(29_999, 2)).unwrap();
        let q = quote_days(8, &r);
        assert_eq!(q.total_price, Decimal::new(34_998, 2));
    }

    #[test]
    fn test_negative_rates_rejected() {
        assert!(matches!(
            Rates::new(Decimal::from(-1), Decimal::from(300)),
            Err(PricingError::NegativeRate { kind: "daily", .. })
        ));
        assert!(matches!(
            Rates::new(Decimal::from(50), Decimal::from(-300)),
            Err(PricingError::NegativeRate { kind: "weekly", .. })
        ));
        assert!(Rates::new(Decimal::ZERO, Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_rates_deserialize_validates() {
        let r: Rates = serde_json::from_str(r#"{"daily": 50, "weekly": 300}"#).unwrap();
        assert_eq!(r.daily(), Decimal::from(50));
        assert!(serde_json::from_str::<Rates>(r#"{"daily": -5, "weekly": 300}"#).is_err());
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(Decimal::from(400)), "$400.00");
        assert_eq!(format_usd(Decimal::new(12_345, 1)), "$1,234.50");
        assert_eq!(format_usd(Decimal::from(1_000_000)), "$1,000,000.00");
        assert_eq!(format_usd(Decimal::ZERO), "$0.00");
        assert_eq!(format_usd(Decimal::new(-5, 0)), "-$5.00");
        assert_eq!(format_usd(Decimal::new(9_996, 3)), "$10.00");
    }
}
