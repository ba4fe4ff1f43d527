//! Search session and backends for Lull
//!
//! This crate provides the pieces around a debounced search box:
//! - Result records and search errors
//! - Backend trait for the remote search service
//! - Offline catalog backend
//! - Session state with stale-response discarding

pub mod backend;
pub mod catalog;
pub mod error;
pub mod session;

// Re-exports
pub use backend::{SearchBackend, SearchHit};
pub use catalog::CatalogBackend;
pub use error::SearchError;
pub use session::{Applied, Dispatch, SearchAction, SearchSession, Ticket};
