use chrono::{DateTime, Duration, Utc};
use http::header::{COOKIE, HeaderMap, SET_COOKIE};
use thiserror::Error;

/// Append an HTTP-only session cookie to `headers`.
pub(crate) fn header_set_cookie(
    headers: &mut HeaderMap,
    name: &str,
    value: &str,
    expires_at: DateTime<Utc>,
    max_age: i64,
) -> Result<(), UtilError> {
    let expires = expires_at.format("%a, %d %b %Y %H:%M:%S GMT");
    let cookie = format!(
        "{name}={value}; SameSite=Lax; Secure; HttpOnly; Path=/; Max-Age={max_age}; Expires={expires}"
    );
    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie(format!("Failed to build cookie {name}")))?,
    );
    Ok(())
}

/// Append a `Set-Cookie` that makes the browser drop cookie `name`.
pub(crate) fn header_delete_cookie(headers: &mut HeaderMap, name: &str) -> Result<(), UtilError> {
    header_set_cookie(
        headers,
        name,
        "",
        Utc::now() - Duration::seconds(86400),
        0,
    )
}

/// Look up a cookie value in the request's `Cookie` header(s).
///
/// Returns `None` for a missing cookie, a non-UTF-8 header, or an empty value.
pub fn get_cookie_from_headers<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    let value = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| match h.to_str() {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::debug!("Ignoring non UTF-8 cookie header: {}", e);
                None
            }
        })
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|s| match s.split_once('=') {
            Some((k, v)) if k.trim() == cookie_name => Some(v.trim()),
            _ => None,
        });

    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            tracing::trace!("No cookie '{}' found", cookie_name);
            None
        }
    }
}

/// Show enough of a credential to correlate log lines without leaking it.
pub(crate) fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(6).collect();
    format!("{prefix}…({} chars)", secret.chars().count())
}

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Cookie error: {0}")]
    Cookie(String),
}
