use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use session_relay::{AUTH_COOKIE_NAME, GateDecision, get_cookie_from_headers, refresh_session_cookie};

use super::config::RELAY_GATE_HEADER;
use super::state::RelayState;

/// Request gate middleware.
///
/// Install with `axum::middleware::from_fn_with_state(state, request_gate)`.
/// Passed requests carry the [`RELAY_GATE_HEADER`] marker; anonymous requests
/// to gated paths are redirected to the login URL. When a session cookie is
/// present the response re-issues it with a renewed lifetime, unless the
/// handler already set or deleted it.
pub async fn request_gate(
    State(state): State<RelayState>,
    mut req: Request,
    next: Next,
) -> Response {
    req.headers_mut().remove(RELAY_GATE_HEADER);

    let credential =
        get_cookie_from_headers(req.headers(), AUTH_COOKIE_NAME.as_str()).map(str::to_string);

    match state.gate().decide(req.uri().path(), credential.is_some()) {
        GateDecision::RedirectToLogin(login_url) => Redirect::to(&login_url).into_response(),
        GateDecision::Pass { refresh_session } => {
            req.headers_mut()
                .insert(RELAY_GATE_HEADER, HeaderValue::from_static("1"));
            let mut response = next.run(req).await;
            if let (true, Some(credential)) = (refresh_session, credential) {
                refresh_cookie(response.headers_mut(), &credential);
            }
            response
        }
    }
}

fn refresh_cookie(headers: &mut HeaderMap, credential: &str) {
    if sets_cookie(headers, AUTH_COOKIE_NAME.as_str()) {
        return;
    }
    match refresh_session_cookie(credential) {
        Ok(refreshed) => {
            for value in refreshed.get_all(SET_COOKIE) {
                headers.append(SET_COOKIE, value.clone());
            }
        }
        Err(e) => tracing::warn!("Session cookie not refreshed: {}", e),
    }
}

fn sets_cookie(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|line| line.split_once('='))
        .any(|(key, _)| key.trim() == name)
}
