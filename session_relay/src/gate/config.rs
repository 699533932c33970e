use std::sync::LazyLock;

use crate::config::{BACKEND_API_URL, CALLBACK_PATH, HOME_PATH, UNAUTHORIZED_PATH};

/// Whether the request gate enforces a session on non allow-listed paths
/// Default: true
///
/// Some hosting edges drop the marker header the gate sets on the request.
/// Turn this off there and guard pages with the `RequireSession` extractor.
pub(crate) static REQUEST_GATE_ENABLED: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("REQUEST_GATE_ENABLED")
        .map(|val| parse_enabled(&val))
        .unwrap_or(true)
});

/// Comma separated list of paths that never require a session
/// Default: "/,/callback,/unauthorize"
pub(crate) static UNAUTHENTICATED_PATHS: LazyLock<Vec<String>> = LazyLock::new(|| {
    std::env::var("UNAUTHENTICATED_PATHS")
        .map(|val| split_paths(&val))
        .unwrap_or_else(|_| default_paths())
});

/// Where an anonymous request to a gated path is sent
/// Default: "{BACKEND_API_URL}/api/auth/login"
pub static IDP_LOGIN_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("IDP_LOGIN_URL")
        .unwrap_or_else(|_| format!("{}/api/auth/login", BACKEND_API_URL.as_str()))
});

fn parse_enabled(val: &str) -> bool {
    !matches!(val.trim().to_lowercase().as_str(), "false" | "0" | "off" | "no")
}

fn split_paths(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_paths() -> Vec<String> {
    [HOME_PATH, CALLBACK_PATH, UNAUTHORIZED_PATH]
        .iter()
        .map(|p| p.to_string())
        .collect()
}
