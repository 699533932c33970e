use http::HeaderName;

/// Request header the gate middleware sets on every request it let through.
///
/// Any value sent by the client is removed first, so downstream handlers can
/// tell whether the gate ran. It marks a passed gate, not a session: allow
/// listed paths pass without one. Nothing in this crate reads it;
/// [`RequireSession`](crate::RequireSession) always checks the cookie itself.
pub const RELAY_GATE_HEADER: HeaderName = HeaderName::from_static("x-relay-gate");

pub const LOGOUT_PATH: &str = "/logout";

pub(crate) const CLEAR_SITE_DATA: HeaderName = HeaderName::from_static("clear-site-data");
