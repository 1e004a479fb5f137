//! HTTP inbound adapter: the admin screens and the JSON surface.

pub mod auth;
pub mod bookings;
pub mod customers;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod pages;
pub mod payments;
pub mod reviews;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod stylists;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
pub use state::HttpState;
