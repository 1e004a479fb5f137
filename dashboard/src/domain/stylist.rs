//! Stylist profiles and weekly schedules.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account summary embedded in a stylist record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylistUser {
    /// Account id.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Contact phone.
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Avatar URL.
    pub avatar: Option<String>,
}

/// One day of a stylist's weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Whether the stylist works that day at all.
    pub is_working: bool,
    /// Shift start (`HH:MM`).
    pub start_time: String,
    /// Shift end (`HH:MM`).
    pub end_time: String,
}

/// Day names used as schedule keys, in display order.
pub const SCHEDULE_DAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Stylist record mirrored from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stylist {
    /// Backend identifier.
    pub id: String,
    /// Owning account id.
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Embedded account summary.
    pub user: Option<StylistUser>,
    #[serde(default)]
    /// Service specialties.
    pub specialties: Vec<String>,
    #[serde(default)]
    /// Years of experience.
    pub experience: u32,
    #[serde(default)]
    /// Average review rating.
    pub rating: f64,
    #[serde(default)]
    /// Review count behind the rating.
    pub total_reviews: u32,
    #[serde(default)]
    /// Lifetime booking count.
    pub total_bookings: u32,
    /// Commission percentage paid on completed services.
    pub commission_rate: f64,
    /// Whether the stylist currently accepts bookings.
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Short biography.
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    /// Weekly schedule keyed by lower-case day name.
    pub schedule: BTreeMap<String, ScheduleEntry>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Stylist {
    /// Display name, falling back to the bare user id when the backend did
    /// not embed the account summary.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.full_name.as_str())
            .unwrap_or(self.user_id.as_str())
    }
}

/// Query filters for the stylist list screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylistFilters {
    /// Requested page.
    pub page: Option<u32>,
    /// Requested page size.
    pub limit: Option<u32>,
    /// Restrict by availability flag.
    pub is_available: Option<bool>,
    /// Restrict to one specialty.
    pub specialty: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
}

/// Create/update payload for a stylist profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StylistDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Account to promote to a stylist (create only).
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    /// Service specialties.
    pub specialties: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Years of experience.
    pub experience: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Commission percentage.
    pub commission_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Short biography.
    pub bio: Option<String>,
}
