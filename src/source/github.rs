//! GitHub notifications over HTTP.
//!
//! [`GithubNotifications`] is the raw source: one `GET` per fetch, one `PUT`
//! per mark-as-read, no caching and no retries.  Wrap it in
//! [`SmartNotifications`](super::SmartNotifications) to cut down on calls.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, info};

use super::{NotificationItem, Notifications};
use crate::error::{expect_status, Result};
use crate::reason::Reason;

/// The public GitHub notifications endpoint.
pub const GITHUB_NOTIFICATIONS: &str = "https://api.github.com/notifications";

const USER_AGENT: &str = concat!("mention-notifications/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

/// Notifications of one GitHub account, filtered by a [`Reason`].
pub struct GithubNotifications {
    reason: Reason,
    /// Value of the `Authorization` header (`token <...>`).
    authorization: String,
    endpoint: String,
    client: Client,
    /// When the last successful fetch started.  Mark-as-read never reaches
    /// past it, so threads that arrive during delivery stay unread.
    fetched_at: Option<DateTime<Utc>>,
}

impl GithubNotifications {
    /// Create a source for the account owning `token`.
    ///
    /// # Arguments
    ///
    /// * `reason`: which notifications to keep.
    /// * `token`: GitHub API token, without any scheme prefix.
    /// * `endpoint`: notifications URL, normally [`GITHUB_NOTIFICATIONS`].
    pub fn new(reason: Reason, token: &str, endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()?;
        Ok(Self {
            reason,
            authorization: format!("token {token}"),
            endpoint: endpoint.into(),
            client,
            fetched_at: None,
        })
    }
}

impl Notifications for GithubNotifications {
    fn fetch(&mut self) -> Result<Vec<NotificationItem>> {
        let started = Utc::now();
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, &self.authorization)
            .header(ACCEPT, "application/vnd.github+json")
            .send()?;
        expect_status(&self.endpoint, response.status(), &[StatusCode::OK])?;

        let notifications: Vec<NotificationItem> = response.json()?;
        self.fetched_at = Some(started);
        info!(count = notifications.len(), "found new notifications");
        Ok(self.reason.filter(notifications))
    }

    fn mark_as_read(&mut self) -> Result<()> {
        let last_read_at = self
            .fetched_at
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        let response = self
            .client
            .put(&self.endpoint)
            .query(&[("last_read_at", last_read_at.as_str())])
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_TYPE, "application/json")
            .body("{}")
            .send()?;

        // 205 means GitHub accepted the request and will finish it in the
        // background.
        let status = expect_status(
            &self.endpoint,
            response.status(),
            &[StatusCode::OK, StatusCode::RESET_CONTENT],
        )?;
        if status == StatusCode::RESET_CONTENT {
            debug!(%last_read_at, "mark-as-read accepted, processing asynchronously");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
