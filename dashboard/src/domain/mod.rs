//! Domain core: entities mirrored from the backend, the permission matrix,
//! and the ports the HTTP screens talk through.
//!
//! Nothing in this module touches a transport. Inbound adapters render the
//! types as HTML or JSON; outbound adapters populate them from the upstream
//! REST API.

pub mod auth;
pub mod booking;
pub mod customer;
pub mod error;
pub mod payment;
pub mod permissions;
pub mod ports;
pub mod review;
pub mod service;
pub mod stats;
pub mod stylist;
pub mod user;

pub use auth::{AuthSession, AuthTokens, LoginCredentials, LoginValidationError};
pub use booking::{Booking, BookingDraft, BookingFilters, BookingStatus, BookingUpdate};
pub use customer::{Customer, CustomerFilters};
pub use error::{Error, ErrorCode};
pub use payment::{Payment, PaymentFilters, PaymentMethod, PaymentStatus};
pub use permissions::{Action, Capabilities, DashboardScope, Resource, has_permission};
pub use review::{Rating, Review, ReviewFilters};
pub use service::{Service, ServiceCategory, ServiceDraft, ServiceFilters};
pub use stats::{DashboardStats, DateRange, StatsFilters};
pub use stylist::{ScheduleEntry, Stylist, StylistDraft, StylistFilters};
pub use user::{Role, User};
