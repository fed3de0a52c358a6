//! Common error types used throughout marquee.
//!
//! Source adapters report one of three outcomes when a lookup fails: the
//! site has no usable match, the site answered with a shape we could not
//! read, or the request itself failed. The enrichment pipeline treats the
//! first as a per-movie stop signal and the other two as skip-and-continue.

/// Common error type for marquee.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source has no usable match for the query.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The source responded, but the expected structure was absent.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The request failed in a way that may succeed on a later run
    /// (timeouts, connection resets, 5xx responses).
    #[error("Transient error: {0}")]
    Transient(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new Malformed error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create a new Transient error.
    pub fn transient<S: Into<String>>(msg: S) -> Self {
        Self::Transient(msg.into())
    }

    /// Returns `true` for errors that should stop enrichment of the current
    /// movie without being treated as a failure of the run.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
