//! Search backend abstraction

use crate::error::SearchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Stable identifier from the service
    pub id: String,

    /// Human-readable title, matched against search terms
    pub title: String,

    /// Image URL
    pub url: String,
}

/// Remote search service
///
/// Implementations must be cheap to share; the debounced action holds one
/// behind an `Arc` and may run several searches at once.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Return at most `limit` hits for `term`
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError>;
}
