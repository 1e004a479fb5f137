//! Appointment records and the filters the booking screens send upstream.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Appointment lifecycle status.
///
/// Transitions happen through dedicated upstream endpoints
/// (`/confirm`, `/cancel`, `/complete`), never by writing the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Booked, awaiting confirmation.
    Pending,
    /// Confirmed by staff.
    Confirmed,
    /// Customer is in the chair.
    InProgress,
    /// Finished and billable.
    Completed,
    /// Cancelled with a reason.
    Cancelled,
    /// Customer did not show up.
    NoShow,
}

impl BookingStatus {
    /// Wire value as sent by the backend.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    /// Which transition actions make sense from this status.
    #[must_use]
    pub const fn can_confirm(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the booking can still be cancelled.
    #[must_use]
    pub const fn can_cancel(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether the booking can be marked completed.
    #[must_use]
    pub const fn can_complete(&self) -> bool {
        matches!(self, Self::Confirmed | Self::InProgress)
    }
}

/// Customer details embedded in a booking response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCustomer {
    /// Account id.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Contact phone, if on file.
    pub phone: Option<String>,
}

/// Stylist details embedded in a booking response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStylist {
    /// Stylist id.
    pub id: String,
    /// Stylist display name.
    pub name: String,
    #[serde(default)]
    /// Specialties, for the detail screen.
    pub specialties: Vec<String>,
    #[serde(default)]
    /// Average rating.
    pub rating: f64,
}

/// Service details embedded in a booking response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingService {
    /// Service id.
    pub id: String,
    /// Service name.
    pub name: String,
    /// Duration in minutes.
    pub duration: u32,
    /// Price in rupiah.
    pub price: i64,
    /// Catalogue category.
    pub category: String,
}

/// Appointment record mirrored from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Backend identifier.
    pub id: String,
    /// Owning customer id.
    pub customer_id: String,
    /// Assigned stylist id.
    pub stylist_id: String,
    /// Booked service id.
    pub service_id: String,
    /// Appointment date (`YYYY-MM-DD`).
    pub appointment_date: NaiveDate,
    /// Appointment start time (`HH:MM`).
    pub appointment_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Computed end time, when the backend provides it.
    pub end_time: Option<String>,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Total amount in rupiah.
    pub total_amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Free-form notes.
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Reason recorded when the booking was cancelled.
    pub cancel_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Embedded customer summary.
    pub customer: Option<BookingCustomer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Embedded stylist summary.
    pub stylist: Option<BookingStylist>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Embedded service summary.
    pub service: Option<BookingService>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Sort direction accepted by the list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Query filters for the booking list screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilters {
    /// Requested page, defaults applied by the gateway.
    pub page: Option<u32>,
    /// Requested page size.
    pub limit: Option<u32>,
    /// Restrict to one customer.
    pub customer_id: Option<String>,
    /// Restrict to one stylist.
    pub stylist_id: Option<String>,
    /// Restrict to one service.
    pub service_id: Option<String>,
    /// Restrict to one status.
    pub status: Option<BookingStatus>,
    /// Appointments on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Appointments on or before this date.
    pub end_date: Option<NaiveDate>,
    /// Field to sort by.
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
}

/// Payload for creating a booking on behalf of a customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Customer the appointment is for.
    pub customer_id: String,
    /// Stylist performing the service.
    pub stylist_id: String,
    /// Service being booked.
    pub service_id: String,
    /// Appointment date.
    pub appointment_date: NaiveDate,
    /// Appointment start time (`HH:MM`).
    pub appointment_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional notes.
    pub notes: Option<String>,
}

/// Partial update for an existing booking.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// New appointment date.
    pub appointment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// New appointment time.
    pub appointment_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Replacement notes.
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BookingStatus::Pending, true, true, false)]
    #[case(BookingStatus::Confirmed, false, true, true)]
    #[case(BookingStatus::InProgress, false, false, true)]
    #[case(BookingStatus::Completed, false, false, false)]
    #[case(BookingStatus::Cancelled, false, false, false)]
    #[case(BookingStatus::NoShow, false, false, false)]
    fn transition_guards_follow_the_lifecycle(
        #[case] status: BookingStatus,
        #[case] confirm: bool,
        #[case] cancel: bool,
        #[case] complete: bool,
    ) {
        assert_eq!(status.can_confirm(), confirm);
        assert_eq!(status.can_cancel(), cancel);
        assert_eq!(status.can_complete(), complete);
    }

    #[test]
    fn status_round_trips_snake_case() {
        let json = serde_json::to_value(BookingStatus::InProgress).expect("serialisable");
        assert_eq!(json, "in_progress");
        let status: BookingStatus = serde_json::from_value(json).expect("deserialisable");
        assert_eq!(status, BookingStatus::InProgress);
    }
}
