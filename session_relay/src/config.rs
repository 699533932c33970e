//! Central configuration for the session_relay crate

use std::sync::LazyLock;

/// Base URL of the backend that owns token issuance
/// Default: "http://localhost:4000"
pub static BACKEND_API_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("BACKEND_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| "http://localhost:4000".to_string())
});

/// Name of the HTTP-only cookie carrying the session credential
/// Default: "auth_token"
pub static AUTH_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("AUTH_COOKIE_NAME")
        .ok()
        .unwrap_or("auth_token".to_string())
});

/// Name of the identity provider's own session cookie, cleared on logout
/// Default: "wos-session"
pub static IDP_SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("IDP_SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("wos-session".to_string())
});

/// Lifetime in seconds written on a refreshed auth cookie
/// Default: 7 days
pub static SESSION_MAX_AGE: LazyLock<i64> = LazyLock::new(|| {
    std::env::var("SESSION_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(7 * 24 * 60 * 60)
});

/// Whether the process runs in development mode (shows raw error codes)
pub static RELAY_DEVELOPMENT: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("RELAY_ENV")
        .map(|val| val.eq_ignore_ascii_case("development"))
        .unwrap_or(false)
});

/// Where to send the browser after logout when the backend returns no upstream
/// sign-out URL. Unset means home, leaving the identity provider session alive.
pub static IDP_LOGOUT_FALLBACK_URL: LazyLock<Option<String>> = LazyLock::new(|| {
    std::env::var("IDP_LOGOUT_FALLBACK_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
});

pub const HOME_PATH: &str = "/";
pub const CALLBACK_PATH: &str = "/callback";
pub const UNAUTHORIZED_PATH: &str = "/unauthorize";

/// Query parameter carrying the one-shot bearer token on the success redirect
pub const TOKEN_QUERY_PARAM: &str = "token";

/// Query parameter carrying the machine-readable error code
pub const ERROR_QUERY_PARAM: &str = "error";
