//! Session termination
//!
//! Clears both representations of a session: the client token store and the
//! cookies. The backend logout call in the middle may fail without stopping
//! the steps after it.

use http::HeaderMap;

use crate::config::{AUTH_COOKIE_NAME, HOME_PATH, IDP_LOGOUT_FALLBACK_URL, IDP_SESSION_COOKIE_NAME};
use crate::gateway::ExchangeGateway;
use crate::store::{SessionStorage, TokenStore};
use crate::utils::header_delete_cookie;

/// Result of [`terminate_session`], rendered by the caller as a redirect.
#[derive(Debug, Clone)]
pub struct Termination {
    /// Deletion `Set-Cookie` entries for the auth and identity provider cookies
    pub headers: HeaderMap,
    pub redirect_to: String,
    /// The backend logout call failed; only the local session was cleared
    pub upstream_failed: bool,
}

/// Run the logout sequence, in order:
///
/// 1. clear `client_store`, when one is given
/// 2. call the backend logout with `credential`, logging any failure
/// 3. emit deletions for the auth cookie and the identity provider cookie
/// 4. redirect to the upstream sign-out URL, else `IDP_LOGOUT_FALLBACK_URL`, else home
#[tracing::instrument(skip_all)]
pub async fn terminate_session<S: SessionStorage>(
    gateway: &ExchangeGateway,
    credential: Option<&str>,
    client_store: Option<&TokenStore<S>>,
) -> Termination {
    if let Some(store) = client_store {
        store.clear_token();
    }

    let (upstream_url, upstream_failed) = match gateway.logout(credential).await {
        Ok(response) => {
            tracing::debug!("Backend logout: {}", response.message);
            (response.workos_logout_url.filter(|u| !u.is_empty()), false)
        }
        Err(e) => {
            tracing::warn!("Backend logout failed, clearing local session anyway: {}", e);
            (None, true)
        }
    };

    let mut headers = HeaderMap::new();
    for name in [AUTH_COOKIE_NAME.as_str(), IDP_SESSION_COOKIE_NAME.as_str()] {
        if let Err(e) = header_delete_cookie(&mut headers, name) {
            tracing::error!("Could not build deletion for cookie {}: {}", name, e);
        }
    }

    let redirect_to = redirect_target(upstream_url, IDP_LOGOUT_FALLBACK_URL.as_deref());
    Termination {
        headers,
        redirect_to,
        upstream_failed,
    }
}

fn redirect_target(upstream: Option<String>, fallback: Option<&str>) -> String {
    if let Some(url) = upstream {
        return url;
    }
    match fallback {
        Some(url) => url.to_string(),
        None => {
            tracing::warn!("No upstream sign-out URL; identity provider session stays active");
            HOME_PATH.to_string()
        }
    }
}
