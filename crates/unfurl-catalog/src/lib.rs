//! Read-only client for the catalog's public product endpoint.

pub mod client;
pub mod error;

pub use client::{fallback_origin, CatalogClient};
pub use error::{CatalogError, FailedRequest, FetchFailure};
