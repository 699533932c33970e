use std::collections::HashMap;

use askama::Template;
use axum::{
    extract::{Query, RawQuery, State},
    http::{HeaderMap, HeaderValue, StatusCode, header::AUTHORIZATION, header::LOCATION},
    response::{Html, IntoResponse, Response},
};
use url::form_urlencoded;

use session_relay::{
    AUTH_COOKIE_NAME, AuthErrorCode, ERROR_QUERY_PARAM, HOME_PATH, IDP_LOGIN_URL,
    RELAY_DEVELOPMENT, UnavailableStorage, get_cookie_from_headers, handle_callback,
    terminate_session,
};

use super::config::CLEAR_SITE_DATA;
use super::error::IntoResponseError;
use super::state::RelayState;

/// `GET /callback?code=...`
///
/// Always answers with a redirect. The raw query is parsed here so a
/// malformed query string cannot turn into an extractor rejection page.
pub(super) async fn callback(
    State(state): State<RelayState>,
    RawQuery(query): RawQuery,
) -> Response {
    let code = query.as_deref().and_then(|q| {
        form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == "code")
            .map(|(_, value)| value.into_owned())
    });

    let outcome = handle_callback(state.gateway(), code.as_deref()).await;
    found(outcome.headers(), &outcome.location())
}

/// `POST /logout`
///
/// Not routed for GET, so a cross-site link or image cannot end the session.
/// The credential comes from the auth cookie, or from a bearer header when a
/// script context calls this directly.
pub(super) async fn logout(State(state): State<RelayState>, headers: HeaderMap) -> Response {
    let credential = get_cookie_from_headers(&headers, AUTH_COOKIE_NAME.as_str())
        .or_else(|| bearer_from(&headers));

    // The tab's token store lives in the browser; Clear-Site-Data reaches it.
    let termination =
        terminate_session::<UnavailableStorage>(state.gateway(), credential, None).await;

    let mut response_headers = termination.headers;
    response_headers.insert(CLEAR_SITE_DATA, HeaderValue::from_static("\"storage\""));
    found(response_headers, &termination.redirect_to)
}

fn bearer_from(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// 302 to `location`, home if `location` cannot be a header value.
fn found(mut headers: HeaderMap, location: &str) -> Response {
    let location = HeaderValue::from_str(location).unwrap_or_else(|e| {
        tracing::error!("Unusable redirect target {:?}: {}", location, e);
        HeaderValue::from_static(HOME_PATH)
    });
    headers.insert(LOCATION, location);
    (StatusCode::FOUND, headers).into_response()
}

#[derive(Template)]
#[template(path = "unauthorized.j2")]
struct UnauthorizedTemplate<'a> {
    title: &'a str,
    message: &'a str,
    code: Option<&'a str>,
    login_url: &'a str,
    home_path: &'a str,
}

/// `GET /unauthorize?error=<code>`
pub(super) async fn unauthorized(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let code = AuthErrorCode::from_query(params.get(ERROR_QUERY_PARAM).map(String::as_str));

    let template = UnauthorizedTemplate {
        title: code.title(),
        message: code.message(),
        code: RELAY_DEVELOPMENT.then_some(code.as_str()),
        login_url: IDP_LOGIN_URL.as_str(),
        home_path: HOME_PATH,
    };
    Ok(Html(template.render().into_response_error()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_from() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_from(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer a.b.c"));
        assert_eq!(bearer_from(&headers), Some("a.b.c"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_from(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_from(&headers), None);
    }

    #[test]
    fn test_found_sets_location() {
        let response = found(HeaderMap::new(), "/unauthorize?error=auth_failed");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/unauthorize?error=auth_failed"
        );
    }

    #[test]
    fn test_found_with_unusable_target_goes_home() {
        let response = found(HeaderMap::new(), "https://idp.example.com/\nlogout");
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
    }

    #[test]
    fn test_template_hides_code_when_absent() {
        let code = AuthErrorCode::TokenExpired;
        let html = UnauthorizedTemplate {
            title: code.title(),
            message: code.message(),
            code: None,
            login_url: "/login",
            home_path: "/",
        }
        .render()
        .unwrap();
        assert!(html.contains("Session Expired"));
        assert!(!html.contains("token_expired"));

        let html = UnauthorizedTemplate {
            title: code.title(),
            message: code.message(),
            code: Some(code.as_str()),
            login_url: "/login",
            home_path: "/",
        }
        .render()
        .unwrap();
        assert!(html.contains("<code>token_expired</code>"));
    }
}
