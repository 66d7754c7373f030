//! Celestia error types.

use submitter_types::{ConfigError, ResponseShapeError};

/// Errors that can occur while submitting a blob.
///
/// Every variant ends the attempt; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum CelestiaError {
    /// Settings are missing or invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// The payload was empty.
    #[error("no data to submit")]
    EmptyPayload,

    /// The payload could not be serialized.
    #[error("failed to encode blob: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The light node endpoint is not a usable URL.
    #[error("invalid light node endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// Endpoint as configured.
        endpoint: String,

        /// Why it was rejected.
        reason: String,
    },

    /// The auth token could not be obtained.
    #[error("failed to fetch auth token: {0}")]
    Auth(String),

    /// The request did not produce a JSON response.
    ///
    /// Displayed generically; the underlying cause is kept as the source.
    #[error("failed to reach light node")]
    Transport(#[source] reqwest::Error),

    /// The response does not carry a transaction result.
    #[error("malformed light node response: {0}")]
    MalformedResponse(#[from] ResponseShapeError),
}
