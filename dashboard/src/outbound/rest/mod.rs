//! Reqwest-backed adapters for the remote barbershop REST backend.
//!
//! [`client::RestClient`] owns transport details (base URL, bearer header,
//! timeout, envelope decoding, error mapping). The per-resource modules
//! implement the domain gateway traits on top of it and own the endpoint
//! paths plus query-string construction.

pub mod auth;
pub mod bookings;
pub mod client;
pub mod customers;
pub mod payments;
pub mod reviews;
pub mod services;
pub mod stats;
pub mod stylists;

pub use client::{Envelope, RestClient};

use crate::domain::ports::{GatewayError, GatewayResult};

/// Page requested when a filter leaves it unset.
pub(crate) const DEFAULT_PAGE: u32 = 1;
/// Page size requested when a filter leaves it unset.
pub(crate) const DEFAULT_LIMIT: u32 = 10;

/// Serialize a request payload, mapping the (unlikely) failure into a
/// gateway decode error instead of panicking.
pub(crate) fn to_body<T: serde::Serialize>(value: &T) -> GatewayResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|error| GatewayError::decode(error.to_string()))
}
