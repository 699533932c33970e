use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    /// The client store holds no token; nothing was sent
    #[error("No access token in the client store")]
    NoToken,

    /// The backend rejected the token. Expiry is only ever discovered this way.
    #[error("Access token rejected by the backend")]
    TokenExpired,

    #[error("Backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Response decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
