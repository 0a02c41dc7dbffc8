use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search API returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("search check timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("backend list does not match engine set: {0}")]
    Misconfigured(String),
}
