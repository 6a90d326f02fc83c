//! Test doubles for [`Notifications`] and notification fixtures.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reqwest::StatusCode;

use super::notification_item::{Repository, Subject};
use super::{NotificationItem, Notifications};
use crate::error::{Error, Result};

/// Build a notification in `octo/hello`.
pub fn item(reason: &str, url: &str, latest_comment_url: &str) -> NotificationItem {
    NotificationItem {
        id: String::new(),
        reason: reason.to_string(),
        subject: Subject {
            url: url.to_string(),
            latest_comment_url: Some(latest_comment_url.to_string()),
        },
        repository: Repository {
            full_name: "octo/hello".to_string(),
        },
    }
}

/// fork, mention, star, mention: the two mentions carry new comments.
pub fn mixed_items() -> Vec<NotificationItem> {
    vec![
        item("fork", "/url/here/qwe/1", "last/comment/urlq"),
        item("mention", "/url/here/2", "/some/url/here/"),
        item("star", "/url/here/bad/3", "/comment/url/8"),
        item("mention", "/here/2", "localhost:80/here/3"),
    ]
}

/// Four mentions, none with a new comment.
pub fn stale_mentions() -> Vec<NotificationItem> {
    (1..=4)
        .map(|n| {
            let url = format!("/same/here/{n}");
            item("mention", &url, &url)
        })
        .collect()
}

/// Call counters shared between a [`ScriptedNotifications`] and the test.
#[derive(Debug, Clone, Default)]
pub struct Calls {
    fetches: Arc<AtomicUsize>,
    marks: Arc<AtomicUsize>,
}

impl Calls {
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn marks(&self) -> usize {
        self.marks.load(Ordering::SeqCst)
    }
}

/// Replays a queue of fetch results; an exhausted queue repeats the last one.
pub struct ScriptedNotifications {
    script: VecDeque<Vec<NotificationItem>>,
    last: Vec<NotificationItem>,
    fail_mark: bool,
    clear_on_mark: bool,
    calls: Calls,
}

impl ScriptedNotifications {
    pub fn new(script: Vec<Vec<NotificationItem>>) -> Self {
        Self {
            script: script.into(),
            last: Vec::new(),
            fail_mark: false,
            clear_on_mark: false,
            calls: Calls::default(),
        }
    }

    /// Make `mark_as_read` fail, so tests can tell whether it was reached.
    pub fn failing_mark_as_read(mut self) -> Self {
        self.fail_mark = true;
        self
    }

    /// After a successful `mark_as_read`, every fetch comes back empty, the
    /// way GitHub stops listing threads that were read.
    pub fn clears_on_mark_as_read(mut self) -> Self {
        self.clear_on_mark = true;
        self
    }

    pub fn calls(&self) -> Calls {
        self.calls.clone()
    }
}

impl Notifications for ScriptedNotifications {
    fn fetch(&mut self) -> Result<Vec<NotificationItem>> {
        self.calls.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        Ok(self.last.clone())
    }

    fn mark_as_read(&mut self) -> Result<()> {
        self.calls.marks.fetch_add(1, Ordering::SeqCst);
        if self.fail_mark {
            return Err(Error::UnexpectedStatus {
                url: "fake://mark-as-read".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        if self.clear_on_mark {
            self.script.clear();
            self.last.clear();
        }
        Ok(())
    }
}

/// A source whose `fetch` always fails.
pub struct BrokenNotifications;

impl Notifications for BrokenNotifications {
    fn fetch(&mut self) -> Result<Vec<NotificationItem>> {
        Err(Error::UnexpectedStatus {
            url: "fake://notifications".to_string(),
            status: StatusCode::BAD_GATEWAY,
        })
    }

    fn mark_as_read(&mut self) -> Result<()> {
        Ok(())
    }
}
