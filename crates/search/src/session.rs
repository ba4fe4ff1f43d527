//! Search session state
//!
//! The debouncer decides when a search starts; the session decides which
//! responses are still worth showing. Every dispatched search gets a
//! [`Ticket`] with an increasing sequence number, and a response is only
//! applied if it is newer than the last one applied. A slow response for an
//! old term can therefore never overwrite results for a newer one.

use crate::backend::{SearchBackend, SearchHit};
use crate::error::SearchError;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, trace};

/// Sequence token for one dispatched search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub term: String,
}

/// A finished search, waiting to be applied to the session
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub ticket: Ticket,
    pub outcome: Result<Vec<SearchHit>, SearchError>,
}

/// What applying a dispatch did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Results replaced the displayed ones
    Results,
    /// The search failed and the error is now displayed
    Failed,
    /// A newer response was already applied; this one was discarded
    Stale,
}

/// Loading / error / results state behind a search box
#[derive(Debug, Default)]
pub struct SearchSession {
    /// Last sequence number handed out
    issued: u64,

    /// Sequence number of the last applied response
    applied: u64,

    loading: bool,
    error: Option<String>,

    /// Term the displayed results belong to
    term: Option<String>,
    results: Vec<SearchHit>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a search for `term` is starting
    pub fn begin(&mut self, term: &str) -> Ticket {
        self.issued += 1;
        self.loading = true;
        self.error = None;

        trace!("Issued ticket {} for '{}'", self.issued, term);
        Ticket {
            seq: self.issued,
            term: term.to_string(),
        }
    }

    /// Apply a finished search unless a newer one was applied first
    pub fn apply(&mut self, dispatch: Dispatch) -> Applied {
        let Dispatch { ticket, outcome } = dispatch;

        if ticket.seq <= self.applied {
            debug!(
                "Discarding stale response for '{}' (ticket {}, already applied {})",
                ticket.term, ticket.seq, self.applied
            );
            return Applied::Stale;
        }

        self.applied = ticket.seq;
        self.loading = self.applied < self.issued;

        match outcome {
            Ok(hits) => {
                self.results = hits;
                self.term = Some(ticket.term);
                self.error = None;
                Applied::Results
            }
            Err(err) => {
                debug!("Search for '{}' failed: {}", ticket.term, err);
                self.error = Some(err.display_message().to_string());
                Applied::Failed
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn results(&self) -> &[SearchHit] {
        &self.results
    }

    /// Number of searches started so far
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

/// The action a search box debounces
///
/// Blank terms are ignored. Anything else starts a ticket on the shared
/// session and queries the backend; the caller applies the returned
/// [`Dispatch`] when it arrives.
pub struct SearchAction<B: ?Sized> {
    backend: Arc<B>,
    session: Arc<Mutex<SearchSession>>,
    limit: usize,
}

impl<B: SearchBackend + ?Sized> SearchAction<B> {
    pub fn new(backend: Arc<B>, session: Arc<Mutex<SearchSession>>, limit: usize) -> Self {
        Self {
            backend,
            session,
            limit,
        }
    }

    pub async fn run(&self, term: String) -> Option<Dispatch> {
        let term = term.trim();
        if term.is_empty() {
            trace!("Ignoring blank search term");
            return None;
        }

        let ticket = self.session.lock().begin(term);
        let outcome = self.backend.search(&ticket.term, self.limit).await;

        Some(Dispatch { ticket, outcome })
    }
}

impl<B: ?Sized> Clone for SearchAction<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            session: Arc::clone(&self.session),
            limit: self.limit,
        }
    }
}
