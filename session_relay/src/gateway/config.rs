use std::sync::LazyLock;
use std::time::Duration;

pub(crate) const EXCHANGE_ENDPOINT: &str = "/api/auth/exchange";
pub(crate) const LOGOUT_ENDPOINT: &str = "/api/auth/logout";

/// Upper bound for a single backend call; a timed out exchange is a failed exchange
/// Default: 30 seconds
pub static EXCHANGE_TIMEOUT: LazyLock<Duration> = LazyLock::new(|| {
    let secs = std::env::var("EXCHANGE_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(30);
    Duration::from_secs(secs)
});
