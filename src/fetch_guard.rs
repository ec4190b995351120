//! Stale-response guard for context-dependent fetches.
//!
//! When the selected student or date changes while a fetch is in flight, the
//! late response must be dropped rather than shown. Each fetch takes a ticket;
//! only the ticket from the newest `begin` is accepted.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

#[derive(Debug, Default)]
pub struct FetchGuard {
    generation: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    context: String,
}

impl FetchTicket {
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Start a fetch for `context`, superseding every earlier ticket.
    pub fn begin(&self, context: impl Into<String>) -> FetchTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        FetchTicket {
            generation,
            context: context.into(),
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.generation
    }

    /// `Some(value)` if `ticket` is still the newest, otherwise `None`.
    pub fn accept<T>(&self, ticket: &FetchTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            debug!(context = %ticket.context, "discarding stale response");
            None
        }
    }
}
