//! Failures raised while talking to the card search service.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`LookupError`] failures.
pub type LookupResult<T> = Result<T, LookupError>;

/// Failures that can occur during a remote lookup.
///
/// The autocomplete never surfaces these to its host: they are logged and the
/// dropdown degrades to the empty state.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build card search client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or the connection dropped.
    #[error("failed to send card search request to `{url}`")]
    RequestSend {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with a non-success status.
    #[error("unexpected card search response status {status} for `{url}`")]
    Status { url: String, status: StatusCode },
    /// The payload could not be read or decoded.
    #[error("failed to decode card search response for `{url}`")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
