//! Filters that decide which notifications are worth forwarding.

use crate::source::NotificationItem;

/// Why a notification should be kept.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Reason {
    /// The account was mentioned in a comment that is still new.
    ///
    /// Once a thread carries one mention GitHub keeps notifying about it for
    /// unrelated events (close, reopen, labels), sometimes still tagged
    /// `"mention"`.  Those follow-ups have `url == latest_comment_url` and are
    /// dropped.
    Mention,
}

impl Reason {
    pub fn matches(&self, item: &NotificationItem) -> bool {
        match self {
            Reason::Mention => item.reason == "mention" && !item.is_stale(),
        }
    }

    /// Keep only the matching items, preserving their order.
    pub fn filter(&self, items: Vec<NotificationItem>) -> Vec<NotificationItem> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}
