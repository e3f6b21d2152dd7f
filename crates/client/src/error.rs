//! Client error types.
//!
//! A non-2xx answer to a mutating call is not an error: it is reported as
//! `Ok(false)`. Errors are reserved for connection faults, unusable read
//! responses, and bad endpoint URLs.

/// Errors raised by the transport and the flair operations built on it.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection refused, reset, timed out, or the body could not be read.
    #[error("transport error: {reason}")]
    Transport { reason: String },

    /// A read operation was answered with a non-2xx status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// A read response body did not decode into the expected shape.
    #[error("failed to decode response: {reason}")]
    Decode { reason: String },

    /// The base URL or a derived endpoint URL is malformed.
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport {
            reason: error.to_string(),
        }
    }
}
