//! Background notification polling.
//!
//! Runs on a dedicated thread: every tick it runs one
//! [`send`](MentionPost::send) per stream, reports the outcome to the main
//! thread over an [`mpsc`] channel, then sleeps for the interval.
//!
//! Streams are handled one after another, so a tick finishes before the next
//! one starts and no stream is ever polled concurrently with itself.  A slow
//! endpoint delays the whole tick; with intervals measured in minutes that is
//! acceptable.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::post::{Delivery, MentionPost};

/// Messages sent from the poller thread to the main thread.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PollMsg {
    /// `count` mentions were delivered and marked read.
    Delivered { stream: String, count: usize },
    /// Nothing new (or the check was skipped).
    Idle { stream: String },
    /// The delivery endpoint refused the token.
    Unauthorized { stream: String },
    /// The cycle failed with this error description.
    Error(String),
}

/// Run one tick: a single send on every stream.
pub fn tick(posts: &mut [MentionPost]) -> Vec<PollMsg> {
    posts
        .iter_mut()
        .map(|post| {
            let stream = post.name().to_string();
            match post.send() {
                Ok(Delivery::Sent(count)) => PollMsg::Delivered { stream, count },
                Ok(Delivery::Nothing) => PollMsg::Idle { stream },
                Ok(Delivery::Unauthorized) => PollMsg::Unauthorized { stream },
                Err(e) => PollMsg::Error(format!("{stream}: {e}")),
            }
        })
        .collect()
}

/// Spawn the background polling thread.
///
/// The first tick runs immediately.  The thread stops once the returned
/// receiver is dropped.
pub fn spawn(mut posts: Vec<MentionPost>, interval: Duration) -> mpsc::Receiver<PollMsg> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
        for msg in tick(&mut posts) {
            // If the receiver is gone the main thread has exited;
            // silently stop polling.
            if tx.send(msg).is_err() {
                return;
            }
        }
        thread::sleep(interval);
    });

    rx
}
