//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use chrono::NaiveDate;

use crate::domain::auth::{AuthSession, AuthTokens};
use crate::domain::ports::{
    Clock, MockAuthGateway, MockBookingsGateway, MockCustomersGateway, MockPaymentsGateway,
    MockReviewsGateway, MockServicesGateway, MockStatsGateway, MockStylistsGateway,
};
use crate::domain::user::{Role, User};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// Generates a fresh signing key per invocation and disables the `Secure`
/// flag so plain-HTTP test requests keep their cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Account fixture with the given role.
#[must_use]
pub fn fixture_user(role: Role) -> User {
    User {
        id: "u-1".to_owned(),
        email: "ayu@example.com".to_owned(),
        full_name: "Ayu Lestari".to_owned(),
        phone: None,
        avatar: None,
        role,
        is_active: true,
        email_verified: true,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

/// Logged-in session fixture with the given role.
#[must_use]
pub fn fixture_auth(role: Role) -> AuthSession {
    AuthSession {
        user: fixture_user(role),
        tokens: AuthTokens {
            token: "bearer-token".to_owned(),
            refresh_token: "refresh-token".to_owned(),
        },
    }
}

/// Clock pinned to one date.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// The date [`mock_state`] pins its clock to.
#[must_use]
pub fn fixture_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 19).expect("valid date")
}

/// State where every gateway is an expectation-free mock. Tests replace
/// the ports they exercise; any other gateway call panics, which doubles
/// as a no-unexpected-calls assertion.
#[must_use]
pub fn mock_state() -> HttpState {
    HttpState {
        auth: Arc::new(MockAuthGateway::new()),
        bookings: Arc::new(MockBookingsGateway::new()),
        services: Arc::new(MockServicesGateway::new()),
        stylists: Arc::new(MockStylistsGateway::new()),
        payments: Arc::new(MockPaymentsGateway::new()),
        customers: Arc::new(MockCustomersGateway::new()),
        reviews: Arc::new(MockReviewsGateway::new()),
        stats: Arc::new(MockStatsGateway::new()),
        clock: Arc::new(FixedClock(fixture_today())),
    }
}
