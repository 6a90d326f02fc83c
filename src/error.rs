//! Error type shared by the notification sources and the delivery layer.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure, timeout, or a body that could not be decoded.
    #[error("HTTP call failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote end answered with a status outside the accepted set.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { url: String, status: StatusCode },

    /// Invalid startup configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Accept `status` if it is one of `accepted`, otherwise fail with
/// [`Error::UnexpectedStatus`].
pub fn expect_status(url: &str, status: StatusCode, accepted: &[StatusCode]) -> Result<StatusCode> {
    if accepted.contains(&status) {
        Ok(status)
    } else {
        Err(Error::UnexpectedStatus {
            url: url.to_string(),
            status,
        })
    }
}
