//! Customer records: user accounts with booking aggregates attached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer account as listed by `/users?role=customer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Backend identifier.
    pub id: String,
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Contact phone.
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Avatar URL.
    pub avatar: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
    #[serde(default)]
    /// Lifetime booking count.
    pub total_bookings: u32,
    #[serde(default)]
    /// Lifetime spend in rupiah.
    pub total_spent: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Date of the most recent booking.
    pub last_booking: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query filters for the customer list screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerFilters {
    /// Requested page.
    pub page: Option<u32>,
    /// Requested page size.
    pub limit: Option<u32>,
    /// Free-text search over name and email.
    pub search: Option<String>,
    /// Field to sort by.
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<super::booking::SortOrder>,
}
