use thiserror::Error;

use crate::error_code::AuthErrorCode;
use crate::gateway::GatewayError;

#[derive(Debug, Error, Clone)]
pub enum RelayError {
    #[error("Callback is missing the OAuth code")]
    MissingCode,

    #[error("Code exchange failed: {0}")]
    Exchange(#[from] GatewayError),

    #[error("Backend reported an unsuccessful exchange")]
    Rejected,
}

impl RelayError {
    /// Reason code surfaced on the unauthorized redirect
    pub fn code(&self) -> AuthErrorCode {
        match self {
            RelayError::MissingCode => AuthErrorCode::MissingCode,
            RelayError::Exchange(_) | RelayError::Rejected => AuthErrorCode::AuthFailed,
        }
    }
}
