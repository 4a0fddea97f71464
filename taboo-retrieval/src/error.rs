//! Retrieval service errors

/// Failure talking to a retrieval or translation service
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing credential for {0}")]
    MissingCredential(String),
}

impl From<reqwest::Error> for RetrievalError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RetrievalError::Parse(e.to_string())
        } else {
            RetrievalError::Network(e.to_string())
        }
    }
}

/// Turn a non-2xx response into an `Api` error
pub(crate) fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, RetrievalError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(RetrievalError::Api(status.as_u16(), body))
}
