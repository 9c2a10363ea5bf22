//! Customer review summaries for the vehicle detail page.

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, HALF_STAR_THRESHOLD, MAX_RATING};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid rating: {0} (must be 1-{max})", max = MAX_RATING)]
pub struct InvalidRating(pub u8);

/// A whole-star rating in `1..=MAX_RATING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// # Errors
    /// Returns `InvalidRating` outside `1..=MAX_RATING`.
    pub const fn new(stars: u8) -> Result<Self, InvalidRating> {
        if stars == 0 || stars > MAX_RATING {
            return Err(InvalidRating(stars));
        }
        Ok(Self(stars))
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = InvalidRating;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub author:        String,
    pub rating:        Rating,
    pub date:          CalendarDate,
    pub comment:       String,
    #[serde(default)]
    pub helpful_count: u32,
}

impl Review {
    /// First letter of the author's name, shown in the avatar bubble.
    pub fn initial(&self) -> Option<char> {
        self.author.chars().next()
    }
}

/// Mean star rating, 0 when there are no reviews.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating.get())).sum();
    f64::from(sum) / reviews.len() as f64
}

/// How a rating is drawn as five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarBreakdown {
    pub full:  u8,
    pub half:  bool,
    pub empty: u8,
}

impl StarBreakdown {
    /// Whole stars for the integer part, a half star when the fraction is at
    /// least one half, and empty stars for the rest.
    pub fn from_rating(rating: f64) -> Self {
        let clamped = rating.clamp(0.0, f64::from(MAX_RATING));
        let full = clamped.floor();
        let half = clamped - full >= HALF_STAR_THRESHOLD;
        // clamped to 0..=MAX_RATING above
        let full = full as u8;
        let empty = MAX_RATING - full - u8::from(half);
        Self { full, half, empty }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingBucket {
    pub stars:      u8,
    pub count:      usize,
    pub percentage: f64,
}

/// Count and share of reviews per star value, highest first.
pub fn distribution(reviews: &[Review]) -> Vec<RatingBucket> {
    let total = reviews.len();
    (1..=MAX_RATING)
        .rev()
        .map(|stars| {
            let count = reviews.iter().filter(|r| r.rating.get() == stars).count();
            let percentage = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            RatingBucket {
                stars,
                count,
                percentage,
            }
        })
        .collect()
}

/// Reviews with exactly `rating` stars, or all of them for `None`.
pub fn filter_by_rating(reviews: &[Review], rating: Option<Rating>) -> Vec<&Review> {
    reviews
        .iter()
        .filter(|r| rating.is_none_or(|wanted| r.rating == wanted))
        .collect()
}

/// "1 review" / "4 reviews"
pub fn review_count_label(count: usize) -> String {
    let noun = if count == 1 { "review" } else { "reviews" };
    format!("{count} {noun}")
}
