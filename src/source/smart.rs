//! Adaptive fetching for sparse notification streams.
//!
//! Mentions are rare.  Polling GitHub every couple of minutes mostly returns
//! nothing, so [`SmartNotifications`] wraps another [`Notifications`] source
//! and, after a run of empty fetches, answers a few cycles with an empty list
//! without calling through.  Detection latency goes up by at most the skip
//! window (counted in poll cycles); API call volume goes down.
//!
//! ## State machine
//!
//! ```text
//!            real fetch, empty             consecutive_empty >= allowed_empty
//! ┌────────┐ consecutive_empty += 1 ┌────────┐ (and allowed_empty > 0)  ┌──────────┐
//! │fetching│ ─────────────────────► │fetching│ ───────────────────────► │ skipping │
//! └────────┘                        └────────┘                          └──────────┘
//!      ▲   real fetch, non-empty: consecutive_empty = 0                      │
//!      │                                                                     │ allowed_empty -= 1
//!      └──────────── allowed_empty == 0: reset to 3 / 0 ◄────────────────────┘
//! ```
//!
//! The state is advisory.  It is never persisted and losing it on restart only
//! costs a few extra API calls.

use tracing::debug;

use super::{NotificationItem, Notifications};
use crate::error::Result;

/// Empty real fetches tolerated before skipping starts, and the number of
/// cycles skipped once it does.
pub const ALLOWED_EMPTY: u32 = 3;

/// A [`Notifications`] decorator that skips polls while the stream is quiet.
///
/// `fetch` either returns exactly what the wrapped source returned in that
/// call, or an empty list without touching the wrapped source.  It never
/// invents items.  `mark_as_read` always delegates.
pub struct SmartNotifications<N> {
    original: N,
    /// Remaining budget; counts down once per skipped cycle.
    allowed_empty: u32,
    /// Back-to-back real fetches that came back empty.
    consecutive_empty: u32,
    /// Whether the *next* `fetch` is skipped.
    skipping: bool,
}

impl<N: Notifications> SmartNotifications<N> {
    pub fn new(original: N) -> Self {
        Self {
            original,
            allowed_empty: ALLOWED_EMPTY,
            consecutive_empty: 0,
            skipping: false,
        }
    }
}

impl<N: Notifications> Notifications for SmartNotifications<N> {
    fn fetch(&mut self) -> Result<Vec<NotificationItem>> {
        if self.allowed_empty == 0 {
            self.allowed_empty = ALLOWED_EMPTY;
            self.consecutive_empty = 0;
        }

        let items = if self.skipping {
            self.allowed_empty -= 1;
            debug!(
                remaining = self.allowed_empty,
                "quiet stream, skipping notifications check"
            );
            Vec::new()
        } else {
            let items = self.original.fetch()?;
            if items.is_empty() {
                self.consecutive_empty += 1;
            } else {
                self.consecutive_empty = 0;
            }
            items
        };

        self.skipping = self.consecutive_empty >= self.allowed_empty && self.allowed_empty > 0;
        Ok(items)
    }

    fn mark_as_read(&mut self) -> Result<()> {
        self.original.mark_as_read()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
