//! Error types for content loading.

/// Errors that can occur while fetching or decoding a content document.
///
/// The applier itself is infallible: a patch whose target or source is
/// missing is skipped, not reported.
#[derive(thiserror::Error, Debug)]
pub enum HydrateError {
    /// The content URL could not be parsed.
    #[error("invalid content URL: {0}")]
    Url(#[from] url::ParseError),

    /// The request failed at the transport level.
    #[error("content request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("content endpoint returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not a well-formed content document.
    #[error("malformed content document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type HydrateResult<T> = Result<T, HydrateError>;
