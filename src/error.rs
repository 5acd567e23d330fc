use thiserror::Error;

/// Error types that can occur while driving a batch run against an agent service.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Transport-level HTTP failures
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// The service answered with a non-success status code
    #[error("HTTP status {status} from {url}")]
    StatusError { status: u16, url: String },
    /// The session endpoint answered without a usable session id
    #[error("Session response format error: {message}. Raw response: {raw_response}")]
    SessionFormatError {
        message: String,
        raw_response: String,
    },
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
    /// Reading questions or writing results failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Converts reqwest HTTP errors into BatchErrors
impl From<reqwest::Error> for BatchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return BatchError::StatusError {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        if err.is_decode() {
            return BatchError::JsonError(err.to_string());
        }
        BatchError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for BatchError {
    fn from(err: serde_json::Error) -> Self {
        BatchError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}
