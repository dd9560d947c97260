//! Error types for the catalog API client.
//!
//! Every client operation returns `Result<_, ApiError>`; there are no
//! sentinel returns (null, false, empty list) anywhere in the client.
//! Callers decide the fallback: list views degrade to an empty collection
//! plus a banner, forms show the message and stay open.

use thiserror::Error;

/// Errors returned by [`crate::api::ApiClient`] operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed: connection refused, DNS failure, timeout.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded into the expected type.
    #[error("decode failure: {0}")]
    Decode(String),

    /// The request payload could not be encoded as JSON.
    #[error("encode failure: {0}")]
    Encode(String),
}

impl ApiError {
    /// True when the server reported that the entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
