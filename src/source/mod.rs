//! Notification source abstraction layer.
//!
//! This module defines the [`Notifications`] trait and the common
//! [`NotificationItem`] type.  Implementations live in sub-modules:
//!
//! * [`github`]: raw HTTP access to the GitHub notifications API.
//! * [`smart`]: a decorator that skips polls while a stream is quiet.
//!
//! Sources compose by wrapping: `SmartNotifications::new(GithubNotifications::new(..)?)`.
//!
//! ## For contributors: adding a new source
//!
//! 1. Create a new file in this directory.
//! 2. Define a struct and implement [`Notifications`] for it.
//! 3. Add `mod` below and re-export your struct in the `pub use` block.
//! 4. Construct it in `main.rs` when building the streams.

#[cfg(test)]
pub mod fake;
mod github;
mod notification_item;
mod smart;

pub use github::{GithubNotifications, GITHUB_NOTIFICATIONS};
pub use notification_item::NotificationItem;
pub use smart::SmartNotifications;

use crate::error::Result;

/// Something that can be polled for notifications and told they were handled.
///
/// The poller calls these from a background thread, so implementations must
/// be [`Send`].  Both calls are synchronous; each tick makes at most one
/// `fetch` / `mark_as_read` pair per stream.
pub trait Notifications: Send {
    /// Fetch the current batch of notifications.
    fn fetch(&mut self) -> Result<Vec<NotificationItem>>;

    /// Mark everything up to now as read.
    fn mark_as_read(&mut self) -> Result<()>;
}
