//! Outbound adapters owned by the gateway.
//!
//! Only one driven side exists: the remote barbershop REST backend.

pub mod rest;
