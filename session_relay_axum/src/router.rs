//! Routes for the callback, logout and unauthorized pages

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use session_relay::{CALLBACK_PATH, UNAUTHORIZED_PATH};

use super::config::LOGOUT_PATH;
use super::handlers::{callback, logout, unauthorized};
use super::state::RelayState;

/// Router serving `/callback`, `/logout` and `/unauthorize`, with HTTP tracing.
///
/// Merge it into the application router. The gate middleware is not applied
/// here since it has to wrap the application's own pages as well:
///
/// ```no_run
/// use axum::{Router, middleware, routing::get};
/// use session_relay_axum::{RelayState, request_gate, session_relay_router};
///
/// # fn build() -> Result<Router, Box<dyn std::error::Error>> {
/// let state = RelayState::from_env()?;
/// let app: Router = Router::new()
///     .route("/", get(|| async { "home" }))
///     .merge(session_relay_router(state.clone()))
///     .layer(middleware::from_fn_with_state(state, request_gate));
/// # Ok(app)
/// # }
/// ```
pub fn session_relay_router(state: RelayState) -> Router {
    session_relay_router_no_trace(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`session_relay_router`] without the tracing layer.
pub fn session_relay_router_no_trace(state: RelayState) -> Router {
    Router::new()
        .route(CALLBACK_PATH, get(callback))
        .route(LOGOUT_PATH, post(logout))
        .route(UNAUTHORIZED_PATH, get(unauthorized))
        .with_state(state)
}
