//! The notification record shared by every source.
//!
//! `NotificationItem` mirrors the subset of a GitHub notification thread that
//! the rest of the application looks at.  Unknown fields in the API response
//! are ignored by serde, so the struct stays small while the upstream schema
//! grows.
//!
//! ## For contributors
//!
//! If you need another field from the GitHub payload (e.g. `updated_at`), add
//! it here with `#[serde(default)]` so older fixtures keep deserialising.

use serde::Deserialize;

/// A single GitHub notification thread.
///
/// Items are immutable once fetched and live only for the poll cycle that
/// produced them.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct NotificationItem {
    /// Thread id assigned by GitHub.  Only used in log output.
    #[serde(default)]
    pub id: String,

    /// Why the account was notified (`"mention"`, `"subscribed"`, ...).
    pub reason: String,

    pub subject: Subject,

    pub repository: Repository,
}

/// The issue or pull request a notification points at.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct Subject {
    /// Canonical API URL of the issue / pull request.
    pub url: String,

    /// API URL of the newest comment on the thread.
    ///
    /// GitHub sends `null` here for threads without comments.
    #[serde(default)]
    pub latest_comment_url: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct Repository {
    /// `owner/name`
    pub full_name: String,
}

impl NotificationItem {
    /// Issue (or pull request) number, taken from the last path segment of
    /// `subject.url`.
    ///
    /// Returns `None` when that segment is not an integer, e.g. for commit
    /// or release subjects.
    pub fn issue_number(&self) -> Option<u64> {
        let url = self.subject.url.trim_end_matches('/');
        url.rsplit('/').next()?.parse().ok()
    }

    /// `true` when the latest comment is the subject itself, i.e. nothing new
    /// was posted since the notification that first referenced the thread.
    pub fn is_stale(&self) -> bool {
        self.subject.latest_comment_url.as_deref() == Some(self.subject.url.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
