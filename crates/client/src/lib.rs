//! Client for the company API with a read-through cache in front of it.
//!
//! The cache is owned by a [`CompanyClient`] instance; there is no process-wide
//! cache state. Reads are served from the cache while fresh, and successful
//! writes evict the entries they make stale.

pub mod backend;
pub mod cache;
pub mod client;
pub mod error;
pub mod metrics;

pub use backend::{CompanyBackend, HttpCompanyBackend};
pub use cache::CompanyCache;
pub use client::CompanyClient;
pub use error::ClientError;
