//! YouTube Data API v3 integration module.
//!
//! Provides the client, per-call query builder, pagination and error types.

pub mod client;
pub mod error;
pub mod models;
pub mod pagination;
pub mod query;

pub use client::{DEFAULT_BASE_URL, YouTube};
pub use error::Error;
pub use models::{ApiError, ApiErrorDetail, Page};
pub use pagination::Limit;
pub use query::Query;
