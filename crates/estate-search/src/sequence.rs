//! Request sequencing for overlapping searches.
//!
//! When a caller fires several searches in quick succession, responses can
//! arrive out of order. Each request takes a token from a [`SearchSequencer`]
//! before it starts; only the response carrying the most recently issued
//! token may be applied. Everything older is discarded on arrival.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Token identifying one issued search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchToken(u64);

impl SearchToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Last-issued-wins sequencer.
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a new request. Tokens increase monotonically.
    pub fn issue(&self) -> SearchToken {
        SearchToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` is still the most recently issued one.
    pub fn is_current(&self, token: SearchToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Hand `response` to `apply` only if `token` is still current.
    ///
    /// Returns `None` when a newer request superseded this one.
    pub fn apply_if_current<T, R>(
        &self,
        token: SearchToken,
        response: T,
        apply: impl FnOnce(T) -> R,
    ) -> Option<R> {
        if self.is_current(token) {
            Some(apply(response))
        } else {
            debug!(
                subsystem = "search",
                component = "sequencer",
                sequence = token.0,
                latest = self.latest.load(Ordering::SeqCst),
                "Discarding superseded search response"
            );
            None
        }
    }
}
