//! Offline catalog backend
//!
//! Serves searches from a JSON array of hits instead of the remote image
//! service. Mirrors the service's behavior closely enough for local use:
//! case-insensitive title matching, result limit, query length validation
//! and optional response latency.

use crate::backend::{SearchBackend, SearchHit};
use crate::error::SearchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Longest query the image service accepts
pub const DEFAULT_MAX_TERM_LEN: usize = 50;

/// In-memory search backend
#[derive(Debug, Clone)]
pub struct CatalogBackend {
    /// Searchable entries, in catalog order
    entries: Vec<SearchHit>,

    /// Simulated response time
    latency: Duration,

    /// Longest accepted term, in characters
    max_term_len: usize,
}

impl CatalogBackend {
    pub fn new(entries: Vec<SearchHit>) -> Self {
        Self {
            entries,
            latency: Duration::ZERO,
            max_term_len: DEFAULT_MAX_TERM_LEN,
        }
    }

    /// Parse a catalog from a JSON array of `{ id, title, url }` objects
    pub fn from_json_str(text: &str) -> Result<Self> {
        let entries: Vec<SearchHit> =
            serde_json::from_str(text).context("Catalog must be a JSON array of {id, title, url}")?;
        Ok(Self::new(entries))
    }

    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;

        debug!("Loaded {} catalog entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_max_term_len(mut self, max_term_len: usize) -> Self {
        self.max_term_len = max_term_len;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate(&self, term: &str) -> Result<(), SearchError> {
        if term.trim().is_empty() {
            return Err(SearchError::Validation {
                message: Some("Search term is required".into()),
            });
        }

        if term.chars().count() > self.max_term_len {
            return Err(SearchError::Validation {
                message: Some(format!(
                    "Search term must be at most {} characters",
                    self.max_term_len
                )),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl SearchBackend for CatalogBackend {
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.validate(term)?;

        let needle = term.trim().to_lowercase();
        let hits: Vec<SearchHit> = self
            .entries
            .iter()
            .filter(|entry| entry.title.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect();

        debug!("Catalog search '{}' matched {} entries", term, hits.len());
        Ok(hits)
    }
}
