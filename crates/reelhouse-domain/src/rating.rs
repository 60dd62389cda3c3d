//! Review rating scale and per-movie rating summaries.

use serde::{Deserialize, Serialize};

/// Lowest accepted review rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted review rating.
pub const MAX_RATING: u8 = 5;

/// A review rating bounded to `MIN_RATING..=MAX_RATING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("rating must be an integer between {MIN_RATING} and {MAX_RATING}")]
pub struct RatingOutOfRange;

impl Rating {
    pub fn new(value: i64) -> Result<Self, RatingOutOfRange> {
        if (MIN_RATING as i64..=MAX_RATING as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(RatingOutOfRange)
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Rating::new(value).map_err(serde::de::Error::custom)
    }
}

/// Average rating and review count for one movie.
///
/// Serializes as `{}` when the movie has no reviews, otherwise as
/// `{"ratingAvg": "4.0", "reviewCount": 3}`. "No reviews" is a valid state,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rating_avg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub review_count: Option<u64>,
}

impl RatingSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a summary from a raw mean and count. A zero count yields the
    /// empty summary regardless of `mean`.
    pub fn from_stats(mean: f64, count: u64) -> Self {
        if count == 0 {
            return Self::empty();
        }
        Self {
            rating_avg: Some(format_one_decimal(mean)),
            review_count: Some(count),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.review_count.is_none()
    }
}

/// Round half away from zero to one decimal place and render with exactly
/// one fractional digit (`4` → `"4.0"`, `4.25` → `"4.3"`).
pub fn format_one_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{rounded:.1}")
}
