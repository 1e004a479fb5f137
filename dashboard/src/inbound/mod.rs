//! Inbound adapters translating operator requests into domain calls.

pub mod http;
