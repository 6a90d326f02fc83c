//! Command-line / environment configuration.
//!
//! Everything is read once in `main`, validated into a [`Config`], and handed
//! down by value.  Nothing else in the crate looks at the environment.

use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::source::GITHUB_NOTIFICATIONS;

/// Poll interval used when none (or an invalid one) is configured.
pub const DEFAULT_INTERVAL_MINUTES: u64 = 2;

#[derive(Debug, Parser)]
#[command(name = "mention-notifications")]
#[command(about = "Forward GitHub mentions of a bot account to a REST endpoint")]
#[command(version)]
pub struct Cli {
    /// GitHub API tokens, separated by ';'.  One stream per token.
    #[arg(long, env = "GITHUB_AUTH_TOKENS", hide_env_values = true)]
    pub github_tokens: String,

    /// Delivery endpoints, separated by ';'.  Paired with the tokens by position.
    #[arg(long, env = "POST_ENDPOINTS")]
    pub post_endpoints: String,

    /// GitHub notifications endpoint.
    #[arg(long, env = "GITHUB_NOTIFICATIONS_ENDPOINT", default_value = GITHUB_NOTIFICATIONS)]
    pub notifications_endpoint: String,

    /// Minutes between checks (default: 2).
    #[arg(long, env = "CHECKS_INTERVAL_MINUTES")]
    pub interval_minutes: Option<String>,
}

/// One token / delivery endpoint pair.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StreamConfig {
    pub token: String,
    pub post_endpoint: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    pub streams: Vec<StreamConfig>,
    pub notifications_endpoint: String,
    pub interval: Duration,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let tokens = split_list(&cli.github_tokens);
        let endpoints = split_list(&cli.post_endpoints);

        if tokens.is_empty() || endpoints.is_empty() {
            return Err(Error::Config(
                "both github tokens and post endpoints are mandatory".to_string(),
            ));
        }
        if tokens.len() != endpoints.len() {
            return Err(Error::Config(format!(
                "got {} github tokens but {} post endpoints; they are paired by position",
                tokens.len(),
                endpoints.len()
            )));
        }

        let streams = tokens
            .into_iter()
            .zip(endpoints)
            .map(|(token, post_endpoint)| StreamConfig {
                token,
                post_endpoint,
            })
            .collect();

        Ok(Self {
            streams,
            notifications_endpoint: cli.notifications_endpoint.trim().to_string(),
            interval: Duration::from_secs(60 * interval_minutes(cli.interval_minutes.as_deref())),
        })
    }
}

/// `a; b;;c` -> `["a", "b", "c"]`
fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parse the configured interval, falling back to
/// [`DEFAULT_INTERVAL_MINUTES`] when it is missing, not a number, or zero.
fn interval_minutes(raw: Option<&str>) -> u64 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_INTERVAL_MINUTES;
    };
    match raw.parse::<u64>() {
        Ok(minutes) if minutes > 0 => {
            info!(minutes, "checking GitHub notifications every {minutes} minutes");
            minutes
        }
        _ => {
            error!(value = raw, "invalid check interval, using {DEFAULT_INTERVAL_MINUTES} minutes");
            DEFAULT_INTERVAL_MINUTES
        }
    }
}
