//! session_relay_axum - Axum integration for session-relay
//!
//! Provides the `/callback`, `/logout` and `/unauthorize` routes, the request
//! gate middleware, and extractors for the display identity.

mod config;
mod error;
mod handlers;
mod middleware;
mod router;
mod session;
mod state;

#[cfg(test)]
mod test_utils;

pub use config::{LOGOUT_PATH, RELAY_GATE_HEADER};
pub use middleware::request_gate;
pub use router::{session_relay_router, session_relay_router_no_trace};
pub use session::{LoginRedirect, RequireSession, SessionIdentity};
pub use state::RelayState;

// Re-export the core crate for applications that only depend on this one
pub use session_relay;
