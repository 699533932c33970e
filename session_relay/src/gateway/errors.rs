use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum GatewayError {
    /// The backend answered the code exchange with a non-2xx status
    #[error("Exchange rejected with status {status}: {body}")]
    Exchange { status: u16, body: String },

    /// The backend answered the logout call with a non-2xx status
    #[error("Logout rejected with status {status}: {body}")]
    Logout { status: u16, body: String },

    /// Timeout, DNS failure, connection reset, ...
    #[error("Network error: {0}")]
    Network(String),

    #[error("Response decode error: {0}")]
    Decode(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}
