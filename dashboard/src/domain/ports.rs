//! Domain ports defining the edges of the hexagon.
//!
//! The screens only ever talk to these traits; the REST adapter in
//! `outbound::rest` implements them against the remote backend. Each trait
//! returns [`GatewayError`] so adapters map transport failures into
//! predictable variants instead of leaking `reqwest` types upward.

use async_trait::async_trait;
use chrono::NaiveDate;
use pagination::Page;
use thiserror::Error;

use super::auth::{AuthSession, AuthTokens, LoginCredentials};
use super::booking::{Booking, BookingDraft, BookingFilters, BookingUpdate};
use super::customer::{Customer, CustomerFilters};
use super::payment::{Payment, PaymentFilters};
use super::review::{Review, ReviewFilters};
use super::service::{Service, ServiceDraft, ServiceFilters};
use super::stats::{DashboardStats, StatsFilters};
use super::stylist::{ScheduleEntry, Stylist, StylistDraft, StylistFilters};
use super::user::User;

/// Failures surfaced by the REST gateway adapters.
///
/// Every variant normalizes to one displayable string via
/// [`GatewayError::user_message`], preferring server-supplied text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Network-level failure reaching the backend.
    #[error("backend unreachable: {message}")]
    Transport {
        /// Underlying transport description.
        message: String,
    },
    /// The request timed out.
    #[error("backend request timed out: {message}")]
    Timeout {
        /// Underlying timeout description.
        message: String,
    },
    /// HTTP 401: the bearer token is missing, expired, or revoked.
    /// Handlers must purge the session and send the operator to `/login`.
    #[error("authentication expired")]
    Unauthorized,
    /// HTTP 403: the backend refused the action for this account.
    #[error("access denied by the backend")]
    Forbidden,
    /// HTTP 404: the resource does not exist upstream.
    #[error("resource not found")]
    NotFound,
    /// A 4xx response or a `success:false` envelope with a server message.
    #[error("request rejected: {message}")]
    Rejected {
        /// Server-supplied, operator-facing message.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("invalid backend response: {message}")]
    Decode {
        /// Decoder description.
        message: String,
    },
    /// HTTP 5xx from the backend.
    #[error("backend error (status {status})")]
    Upstream {
        /// Upstream status code.
        status: u16,
    },
}

impl GatewayError {
    /// Helper for transport failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for timeouts.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for rejected requests carrying a server message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Helper for decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// One displayable string for the alert block, preferring the
    /// server-supplied message and falling back to a generic one.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message } => message.clone(),
            Self::NotFound => "Data tidak ditemukan".to_owned(),
            Self::Forbidden => "Anda tidak memiliki akses untuk aksi ini".to_owned(),
            Self::Timeout { .. } => "Permintaan ke server melebihi batas waktu".to_owned(),
            Self::Transport { .. } | Self::Upstream { .. } => {
                "Server tidak dapat dihubungi, coba lagi".to_owned()
            }
            Self::Unauthorized | Self::Decode { .. } => "An unexpected error occurred".to_owned(),
        }
    }
}

/// Result alias used across the ports.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Authentication operations against `/auth/*`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for tokens and the account record.
    async fn login(&self, credentials: &LoginCredentials) -> GatewayResult<AuthSession>;
    /// Verify a stored token by fetching the profile behind it.
    async fn profile(&self, tokens: &AuthTokens) -> GatewayResult<User>;
    /// Invalidate the tokens upstream; best effort.
    async fn logout(&self, tokens: &AuthTokens) -> GatewayResult<()>;
}

/// Booking operations against `/bookings/*`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingsGateway: Send + Sync {
    /// Page through bookings matching the filters.
    async fn list(&self, token: &str, filters: &BookingFilters) -> GatewayResult<Page<Booking>>;
    /// Fetch one booking.
    async fn get(&self, token: &str, id: &str) -> GatewayResult<Booking>;
    /// Create a booking on behalf of a customer.
    async fn create(&self, token: &str, draft: &BookingDraft) -> GatewayResult<Booking>;
    /// Update date/time/notes.
    async fn update(&self, token: &str, id: &str, update: &BookingUpdate)
    -> GatewayResult<Booking>;
    /// Confirm a pending booking.
    async fn confirm(&self, token: &str, id: &str) -> GatewayResult<Booking>;
    /// Cancel with a reason.
    async fn cancel(&self, token: &str, id: &str, reason: &str) -> GatewayResult<Booking>;
    /// Mark completed.
    async fn complete(&self, token: &str, id: &str) -> GatewayResult<Booking>;
}

/// Catalogue operations against `/services/*`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServicesGateway: Send + Sync {
    /// Page through services matching the filters.
    async fn list(&self, token: &str, filters: &ServiceFilters) -> GatewayResult<Page<Service>>;
    /// Fetch one service.
    async fn get(&self, token: &str, id: &str) -> GatewayResult<Service>;
    /// Create a catalogue entry.
    async fn create(&self, token: &str, draft: &ServiceDraft) -> GatewayResult<Service>;
    /// Replace a catalogue entry.
    async fn update(&self, token: &str, id: &str, draft: &ServiceDraft) -> GatewayResult<Service>;
    /// Delete a catalogue entry.
    async fn delete(&self, token: &str, id: &str) -> GatewayResult<()>;
    /// Flip the bookable flag.
    async fn toggle_active(&self, token: &str, id: &str) -> GatewayResult<Service>;
}

/// Stylist operations against `/stylists/*`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StylistsGateway: Send + Sync {
    /// Page through stylists matching the filters.
    async fn list(&self, token: &str, filters: &StylistFilters) -> GatewayResult<Page<Stylist>>;
    /// Fetch one stylist.
    async fn get(&self, token: &str, id: &str) -> GatewayResult<Stylist>;
    /// Promote an account to a stylist profile.
    async fn create(&self, token: &str, draft: &StylistDraft) -> GatewayResult<Stylist>;
    /// Update a stylist profile.
    async fn update(&self, token: &str, id: &str, draft: &StylistDraft) -> GatewayResult<Stylist>;
    /// Flip the availability flag.
    async fn toggle_availability(&self, token: &str, id: &str) -> GatewayResult<Stylist>;
    /// Fetch the schedule for one date.
    async fn schedule(&self, token: &str, id: &str, date: NaiveDate)
    -> GatewayResult<Vec<ScheduleEntry>>;
    /// Add a schedule entry for one day.
    async fn add_schedule(
        &self,
        token: &str,
        id: &str,
        day: &str,
        entry: &ScheduleEntry,
    ) -> GatewayResult<Stylist>;
}

/// Payment operations against `/payments/*`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentsGateway: Send + Sync {
    /// Page through payments matching the filters.
    async fn list(&self, token: &str, filters: &PaymentFilters) -> GatewayResult<Page<Payment>>;
    /// Fetch one payment.
    async fn get(&self, token: &str, id: &str) -> GatewayResult<Payment>;
    /// Refund a settled payment with a reason.
    async fn refund(&self, token: &str, id: &str, reason: &str) -> GatewayResult<Payment>;
}

/// Customer operations against `/users?role=customer`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomersGateway: Send + Sync {
    /// Page through customers matching the filters.
    async fn list(&self, token: &str, filters: &CustomerFilters) -> GatewayResult<Page<Customer>>;
    /// Fetch one customer.
    async fn get(&self, token: &str, id: &str) -> GatewayResult<Customer>;
    /// Page through one customer's bookings.
    async fn booking_history(
        &self,
        token: &str,
        id: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> GatewayResult<Page<Booking>>;
}

/// Review moderation against `/bookings/reviews/*`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewsGateway: Send + Sync {
    /// Page through reviews matching the filters.
    async fn list(&self, token: &str, filters: &ReviewFilters) -> GatewayResult<Page<Review>>;
    /// Fetch one review.
    async fn get(&self, token: &str, id: &str) -> GatewayResult<Review>;
    /// Flip the public visibility flag.
    async fn toggle_visibility(&self, token: &str, id: &str) -> GatewayResult<Review>;
    /// Delete a review.
    async fn delete(&self, token: &str, id: &str) -> GatewayResult<()>;
}

/// Aggregate statistics from `/dashboard/stats`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsGateway: Send + Sync {
    /// Fetch the stats tree for a date window.
    async fn stats(&self, token: &str, filters: &StatsFilters) -> GatewayResult<DashboardStats>;
}

/// Source of "today", kept behind a port so date windows are testable.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// The current date in the shop's timezone.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation of [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_messages_win_the_display_priority() {
        let err = GatewayError::rejected("Jadwal sudah terisi");
        assert_eq!(err.user_message(), "Jadwal sudah terisi");
    }

    #[test]
    fn variants_without_server_text_fall_back_to_generic_messages() {
        assert_eq!(
            GatewayError::decode("bad json").user_message(),
            "An unexpected error occurred"
        );
        assert_eq!(
            GatewayError::Upstream { status: 502 }.user_message(),
            "Server tidak dapat dihubungi, coba lagi"
        );
    }
}
