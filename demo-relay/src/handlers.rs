use askama::Template;
use axum::{http::StatusCode, response::Html};

use session_relay_axum::session_relay::{DisplayIdentity, TOKEN_QUERY_PARAM, TOKEN_STORAGE_KEY};
use session_relay_axum::{LOGOUT_PATH, RequireSession, SessionIdentity};

#[derive(Template)]
#[template(path = "index.j2")]
struct IndexTemplate<'a> {
    identity: Option<&'a DisplayIdentity>,
    logout_path: &'a str,
    token_param: &'a str,
    storage_key: &'a str,
}

#[derive(Template)]
#[template(path = "dashboard.j2")]
struct DashboardTemplate<'a> {
    identity: &'a DisplayIdentity,
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
    logout_path: &'a str,
}

pub(crate) async fn index(
    SessionIdentity(identity): SessionIdentity,
) -> Result<Html<String>, (StatusCode, String)> {
    let template = IndexTemplate {
        identity: identity.as_ref(),
        logout_path: LOGOUT_PATH,
        token_param: TOKEN_QUERY_PARAM,
        storage_key: TOKEN_STORAGE_KEY,
    };
    let html = Html(
        template
            .render()
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
    );
    Ok(html)
}

/// Guarded twice: by the gate middleware, and by `RequireSession` for
/// deployments that run with `REQUEST_GATE_ENABLED=false`.
pub(crate) async fn dashboard(
    RequireSession(identity): RequireSession,
) -> Result<Html<String>, (StatusCode, String)> {
    tracing::trace!("Dashboard for user {}", identity.id);
    let template = DashboardTemplate {
        identity: &identity,
        first_name: identity.first_name.as_deref(),
        last_name: identity.last_name.as_deref(),
        logout_path: LOGOUT_PATH,
    };
    let html = Html(
        template
            .render()
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
    );
    Ok(html)
}
