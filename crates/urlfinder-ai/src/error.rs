use std::time::Duration;

use thiserror::Error;

/// The model call failed; the record is skipped.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[cfg(feature = "ollama")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("model request timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed model response: {0}")]
    Envelope(String),
}

/// Neither strict parsing nor repair produced a JSON value.
#[derive(Debug, Error)]
#[error("unparseable model response ({reason})")]
pub struct ParseFailure {
    /// The response exactly as received, for diagnostics.
    pub raw: String,
    pub reason: String,
}

/// A [`Rule`](crate::Rule) was built with an empty needle, which would match everything.
#[derive(Debug, Error)]
#[error("extraction rule needle must not be empty")]
pub struct EmptyRule;
