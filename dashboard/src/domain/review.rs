//! Customer reviews and the moderation actions on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

/// Error returned when a rating is outside the 1..=5 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingOutOfRange(pub u8);

impl Rating {
    /// Construct a rating, rejecting values outside 1..=5.
    pub const fn new(value: u8) -> Result<Self, RatingOutOfRange> {
        if value >= 1 && value <= 5 {
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange(value))
        }
    }

    /// The underlying star count.
    #[must_use]
    pub const fn stars(&self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Review record mirrored from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Backend identifier.
    pub id: String,
    /// Booking the review refers to.
    pub booking_id: String,
    /// Reviewing customer.
    pub customer_id: String,
    /// Reviewed stylist.
    pub stylist_id: String,
    /// Star rating, 1 to 5.
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Free-form comment.
    pub comment: Option<String>,
    #[serde(default)]
    /// Whether the customer chose to stay anonymous.
    pub is_anonymous: bool,
    /// Whether the review is shown publicly; moderation toggles this.
    pub is_visible: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query filters for the review moderation screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilters {
    /// Requested page.
    pub page: Option<u32>,
    /// Requested page size.
    pub limit: Option<u32>,
    /// Restrict to one stylist.
    pub stylist_id: Option<String>,
    /// Restrict to one star rating.
    pub rating: Option<Rating>,
    /// Restrict by visibility flag.
    pub is_visible: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(255)]
    fn out_of_range_ratings_are_rejected(#[case] raw: u8) {
        assert_eq!(Rating::new(raw), Err(RatingOutOfRange(raw)));
        let result: Result<Rating, _> = serde_json::from_value(serde_json::json!(raw));
        assert!(result.is_err());
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn in_range_ratings_round_trip(#[case] raw: u8) {
        let rating = Rating::new(raw).expect("valid rating");
        assert_eq!(rating.stars(), raw);
        let json = serde_json::to_value(rating).expect("serialisable");
        assert_eq!(json, raw);
    }
}
