//! Per-channel generation counters for debounce and stale suppression.
//!
//! Every dispatch on a channel takes a [`Ticket`]. A debounced dispatch
//! sleeps for its window and proceeds only if no newer ticket was issued in
//! the meantime; a resolved response is applied only if its ticket is still
//! the latest. Channels never share a counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Position of one dispatch in its channel's issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic issue counter for one channel.
#[derive(Debug, Default)]
pub struct Generation {
    latest: AtomicU64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued before.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// `true` while no newer ticket has been issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Wait out the quiescence window, then report whether `ticket` survived
    /// it. A zero window does not yield.
    pub async fn quiesce(&self, ticket: Ticket, window: Duration) -> bool {
        if !window.is_zero() {
            tokio::time::sleep(window).await;
        }
        self.is_current(ticket)
    }
}

/// How a debounced dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response updated visible state.
    Applied,
    /// A newer trigger arrived inside the window; nothing was dispatched.
    Coalesced,
    /// Dispatched, but a newer dispatch was issued before this one resolved.
    Stale,
    /// Nothing to dispatch (e.g. query too short).
    Skipped,
}
