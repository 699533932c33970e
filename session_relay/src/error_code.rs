use std::fmt;
use std::str::FromStr;

/// Machine-readable reason carried on the unauthorized redirect (`?error=<code>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorCode {
    MissingCode,
    AuthFailed,
    Unauthorized,
    TokenExpired,
    InvalidToken,
}

impl AuthErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthErrorCode::MissingCode => "missing_code",
            AuthErrorCode::AuthFailed => "auth_failed",
            AuthErrorCode::Unauthorized => "unauthorized",
            AuthErrorCode::TokenExpired => "token_expired",
            AuthErrorCode::InvalidToken => "invalid_token",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AuthErrorCode::MissingCode | AuthErrorCode::AuthFailed => "Authentication Failed",
            AuthErrorCode::TokenExpired => "Session Expired",
            AuthErrorCode::InvalidToken => "Invalid Session",
            AuthErrorCode::Unauthorized => "Unauthorized",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthErrorCode::MissingCode => {
                "The authentication code is missing. Please try logging in again."
            }
            AuthErrorCode::AuthFailed => "We couldn't verify your credentials. Please try again.",
            AuthErrorCode::TokenExpired => "Your session has expired. Please log in again.",
            AuthErrorCode::InvalidToken => {
                "Your session could not be recognised. Please log in again."
            }
            AuthErrorCode::Unauthorized => {
                "You are not authorized to access this resource. Please log in to continue."
            }
        }
    }

    /// Parse a code from the query string, falling back to `Unauthorized` for
    /// anything missing or unknown.
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(AuthErrorCode::Unauthorized)
    }
}

impl FromStr for AuthErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "missing_code" => Ok(AuthErrorCode::MissingCode),
            "auth_failed" => Ok(AuthErrorCode::AuthFailed),
            "unauthorized" => Ok(AuthErrorCode::Unauthorized),
            "token_expired" => Ok(AuthErrorCode::TokenExpired),
            "invalid_token" => Ok(AuthErrorCode::InvalidToken),
            _ => Err(format!("Unknown auth error code: {s}")),
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
