//! Gateway errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API no longer accepts the session's token (or none was sent).
    #[error("not signed in")]
    Unauthenticated,

    /// The API answered with a non-success status.
    #[error("request failed ({status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,

        /// The API's `message`, or a generic description
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// A request body could not be built.
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl GatewayError {
    pub(crate) fn decode(error: impl ToString) -> Self {
        Self::Decode(error.to_string())
    }
}
