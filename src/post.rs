//! Delivery of mentions to the handling endpoint.
//!
//! A [`MentionPost`] pairs one notification source with one REST endpoint.
//! Each [`send`](MentionPost::send) fetches, packs the notifications into a
//! small JSON array and POSTs it.  What to do about a mention is decided on
//! the other side; this end only needs the repository and the issue number.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{expect_status, Result};
use crate::source::{NotificationItem, Notifications};

const TIMEOUT: Duration = Duration::from_secs(30);

/// One simplified notification, as sent over the wire.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub repo_full_name: String,
    pub issue_number: u64,
}

/// What happened to one batch.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Delivery {
    /// Nothing to send; no request was made.
    Nothing,
    /// The endpoint took this many notifications and they were marked read.
    Sent(usize),
    /// The endpoint refused our token.  Notifications stay unread.
    Unauthorized,
}

/// Keep the repository name and issue number of every notification.
///
/// Subjects whose URL does not end in a number (commits, releases) cannot be
/// addressed by issue number and are left out.
pub fn pack(notifications: &[NotificationItem]) -> Vec<Parcel> {
    notifications
        .iter()
        .filter_map(|item| match item.issue_number() {
            Some(issue_number) => Some(Parcel {
                repo_full_name: item.repository.full_name.clone(),
                issue_number,
            }),
            None => {
                warn!(id = %item.id, url = %item.subject.url, "no issue number in subject url, skipping");
                None
            }
        })
        .collect()
}

/// A notification source and the endpoint its mentions are posted to.
pub struct MentionPost {
    notifications: Box<dyn Notifications>,
    authorization: String,
    endpoint: String,
    client: Client,
}

impl MentionPost {
    pub fn new(
        notifications: Box<dyn Notifications>,
        token: &str,
        endpoint: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder().timeout(TIMEOUT).build()?;
        Ok(Self {
            notifications,
            authorization: format!("Bearer {token}"),
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Label used in logs and poll reports.
    pub fn name(&self) -> &str {
        &self.endpoint
    }

    /// Fetch, post, and on success mark the notifications as read.
    ///
    /// A `401` from the endpoint is a soft failure ([`Delivery::Unauthorized`]);
    /// any status other than `200`/`401` is an error.
    pub fn send(&mut self) -> Result<Delivery> {
        let notifications = self.notifications.fetch()?;
        let parcel = pack(&notifications);
        if parcel.is_empty() {
            // Left unread, undeliverable mentions would come back on every
            // check and keep the source from ever going quiet.
            if !notifications.is_empty() {
                warn!(count = notifications.len(), "no deliverable mentions, marking them as read");
                self.notifications.mark_as_read()?;
            }
            return Ok(Delivery::Nothing);
        }

        info!(endpoint = %self.endpoint, count = parcel.len(), "sending notifications");
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, &self.authorization)
            .json(&parcel)
            .send()?;
        let status = expect_status(
            &self.endpoint,
            response.status(),
            &[StatusCode::OK, StatusCode::UNAUTHORIZED],
        )
        .inspect_err(|e| error!(error = %e, "could not send notifications"))?;

        if status == StatusCode::UNAUTHORIZED {
            warn!(endpoint = %self.endpoint, "endpoint rejected our token, notifications stay unread");
            return Ok(Delivery::Unauthorized);
        }

        info!("notifications sent, marking them as read");
        self.notifications.mark_as_read()?;
        info!("notifications marked as read");
        Ok(Delivery::Sent(parcel.len()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
