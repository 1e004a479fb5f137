//! Admin dashboard gateway library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod view;

pub use doc::ApiDoc;
