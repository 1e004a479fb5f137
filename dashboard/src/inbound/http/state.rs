//! Shared HTTP adapter state.
//!
//! Handlers accept this bundle via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without a live backend.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::ports::{
    AuthGateway, BookingsGateway, Clock, CustomersGateway, PaymentsGateway, ReviewsGateway,
    ServicesGateway, StatsGateway, StylistsGateway, SystemClock,
};
use crate::outbound::rest::{
    RestClient,
    auth::RestAuthGateway,
    bookings::RestBookingsGateway,
    customers::RestCustomersGateway,
    payments::RestPaymentsGateway,
    reviews::RestReviewsGateway,
    services::RestServicesGateway,
    stats::RestStatsGateway,
    stylists::RestStylistsGateway,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Login, profile verification, and logout.
    pub auth: Arc<dyn AuthGateway>,
    /// Booking listing and lifecycle transitions.
    pub bookings: Arc<dyn BookingsGateway>,
    /// Service catalogue management.
    pub services: Arc<dyn ServicesGateway>,
    /// Stylist profiles and schedules.
    pub stylists: Arc<dyn StylistsGateway>,
    /// Payment listing and refunds.
    pub payments: Arc<dyn PaymentsGateway>,
    /// Customer directory.
    pub customers: Arc<dyn CustomersGateway>,
    /// Review moderation.
    pub reviews: Arc<dyn ReviewsGateway>,
    /// Aggregate dashboard statistics.
    pub stats: Arc<dyn StatsGateway>,
    /// Source of "today" for default date windows.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Wire every port to the REST backend behind `base_url`.
    pub fn for_backend(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = RestClient::new(base_url, timeout)?;
        Ok(Self {
            auth: Arc::new(RestAuthGateway::new(client.clone())),
            bookings: Arc::new(RestBookingsGateway::new(client.clone())),
            services: Arc::new(RestServicesGateway::new(client.clone())),
            stylists: Arc::new(RestStylistsGateway::new(client.clone())),
            payments: Arc::new(RestPaymentsGateway::new(client.clone())),
            customers: Arc::new(RestCustomersGateway::new(client.clone())),
            reviews: Arc::new(RestReviewsGateway::new(client.clone())),
            stats: Arc::new(RestStatsGateway::new(client)),
            clock: Arc::new(SystemClock),
        })
    }
}
