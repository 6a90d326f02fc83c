//! mention-notifications: forwards GitHub mentions of a bot account to a
//! REST endpoint.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  PollMsg   ┌──────────┐
//! │  poll.rs │ ─────────► │ main.rs  │  (logs each report)
//! │ (thread) │  (channel) └──────────┘
//! └────┬─────┘
//!      │ send()
//! ┌────▼─────┐ fetch / mark_as_read ┌───────────────────┐   ┌────────────────────┐
//! │ post.rs  │ ───────────────────► │ SmartNotifications│ ─►│ GithubNotifications│
//! └──────────┘                      └───────────────────┘   └────────────────────┘
//! ```
//!
//! * **`source/`**: the `Notifications` trait, the GitHub HTTP source and the
//!   adaptive decorator that skips checks while a stream is quiet.
//! * **`reason`**: which notifications count as mentions.
//! * **`post`**: packs mentions and POSTs them; marks them read on success.
//! * **`poll`**: background thread that runs every stream on a timer.
//! * **`config`**: command line / environment, validated once.
//! * **`main`**: wires everything together and reports poll outcomes.

mod config;
mod error;
mod poll;
mod post;
mod reason;
mod source;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use config::{Cli, Config};
use poll::PollMsg;
use post::MentionPost;
use reason::Reason;
use source::{GithubNotifications, SmartNotifications};

fn init_tracing() {
    // RUST_LOG wins, e.g. RUST_LOG=mention_notifications=debug
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mention_notifications=info"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// One [`MentionPost`] per configured stream, each with its own decorator.
fn build_posts(config: &Config) -> Result<Vec<MentionPost>> {
    config
        .streams
        .iter()
        .map(|stream| {
            let github = GithubNotifications::new(
                Reason::Mention,
                &stream.token,
                config.notifications_endpoint.as_str(),
            )?;
            let post = MentionPost::new(
                Box::new(SmartNotifications::new(github)),
                &stream.token,
                stream.post_endpoint.as_str(),
            )?;
            Ok(post)
        })
        .collect::<error::Result<Vec<_>>>()
        .context("failed to set up HTTP clients")
}

fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_cli(Cli::parse()).context("invalid configuration")?;
    let posts = build_posts(&config)?;
    info!(
        streams = posts.len(),
        interval_secs = config.interval.as_secs(),
        "watching GitHub notifications"
    );

    let rx = poll::spawn(posts, config.interval);

    // One report per stream per tick; a failed cycle is logged and the
    // poller carries on with the next one.
    for msg in rx {
        match msg {
            PollMsg::Delivered { stream, count } => {
                info!(%stream, count, "delivered mentions");
            }
            PollMsg::Idle { stream } => {
                debug!(%stream, "no new mentions");
            }
            PollMsg::Unauthorized { stream } => {
                warn!(%stream, "delivery endpoint returned 401 Unauthorized");
            }
            PollMsg::Error(e) => {
                error!(error = %e, "notification check failed");
            }
        }
    }

    Ok(())
}
