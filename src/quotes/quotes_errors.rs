use thiserror::Error;

/// Remote quote failures. A non-success response is an error in its own
/// right; it must never be flattened into an empty result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Parsing error: {0}")]
    ParsingError(String),

    #[error("Quote request was not successful: {0}")]
    RequestFailed(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::ParsingError(err.to_string())
        } else {
            RemoteError::NetworkError(err.to_string())
        }
    }
}
