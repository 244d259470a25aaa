//! Per-view state guarded by generation tokens.
//!
//! Every fetch a view starts takes a [`Ticket`] carrying the view's current
//! generation. Starting another fetch bumps the generation, so a response
//! that resolves late for an earlier ticket is discarded instead of
//! overwriting newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, error};

use crate::error::PriceCompareError;
use crate::outcome::FetchOutcome;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Monotonic per-view request counter.
///
/// Clones share the counter, so a background task can check whether its
/// ticket is still current before doing more work.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, invalidating every earlier ticket.
    pub fn next(&self) -> Ticket {
        Ticket(self.0.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current() == ticket.0
    }
}

/// Token identifying one request of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// What [`ViewState::complete`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request was started; the response was dropped.
    Stale,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ViewState<T> {
    name: &'static str,
    generation: Generation,
    data: Vec<T>,
    loading: bool,
    loaded: bool,
    last_error: Option<PriceCompareError>,
}

impl<T> ViewState<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            generation: Generation::new(),
            data: Vec::new(),
            loading: false,
            loaded: false,
            last_error: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Shared handle on this view's generation counter.
    pub fn generation(&self) -> Generation {
        self.generation.clone()
    }

    /// Start a fetch and show the loading indicator.
    pub fn begin(&mut self) -> Ticket {
        self.loading = true;
        let ticket = self.generation.next();
        debug!(view = self.name, generation = ticket.0, "fetch started");
        ticket
    }

    /// Apply the response of the fetch identified by `ticket`.
    ///
    /// Only the most recent ticket is applied. A failure keeps the rows
    /// already on screen and is remembered in [`last_error`](Self::last_error).
    pub fn complete(&mut self, ticket: Ticket, outcome: FetchOutcome<T>) -> Completion {
        if !self.generation.is_current(ticket) {
            debug!(
                view = self.name,
                generation = ticket.0,
                current = self.generation.current(),
                "discarding stale response"
            );
            return Completion::Stale;
        }

        self.loading = false;
        self.loaded = true;
        match outcome {
            FetchOutcome::Rows(rows) => {
                self.data = rows;
                self.last_error = None;
            }
            FetchOutcome::Empty => {
                self.data.clear();
                self.last_error = None;
            }
            FetchOutcome::Failed(e) => {
                error!(view = self.name, error = %e, "fetch failed, keeping previous state");
                self.last_error = Some(e);
            }
        }
        Completion::Applied
    }

    /// Drop all rows, e.g. when the selection they belonged to is cleared.
    pub fn reset(&mut self) {
        self.generation.next();
        self.data.clear();
        self.loading = false;
        self.loaded = false;
        self.last_error = None;
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True once any fetch of the current generation has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// True when the view should render its "no data" message.
    pub fn is_empty(&self) -> bool {
        !self.loading && self.data.is_empty()
    }

    pub fn last_error(&self) -> Option<&PriceCompareError> {
        self.last_error.as_ref()
    }
}
