use http::header::{HeaderMap, SET_COOKIE};
use http::HeaderValue;

use crate::config::{
    AUTH_COOKIE_NAME, ERROR_QUERY_PARAM, HOME_PATH, TOKEN_QUERY_PARAM, UNAUTHORIZED_PATH,
};
use crate::error_code::AuthErrorCode;
use crate::gateway::ExchangeGateway;
use crate::utils::redact;

use super::errors::RelayError;
use super::set_cookie::extract_cookie_value;

/// Terminal state of one OAuth callback. Always rendered as a redirect.
#[derive(Debug, Clone)]
pub enum CallbackOutcome {
    /// Exchange succeeded. `set_cookie` is forwarded unmodified; `token`, when
    /// found, rides on the redirect as a one-shot query parameter.
    Success {
        set_cookie: Vec<HeaderValue>,
        token: Option<String>,
    },
    /// Nothing from the backend is forwarded.
    Failure(AuthErrorCode),
}

impl CallbackOutcome {
    /// Redirect target: home (optionally `?token=`), or the unauthorized page.
    pub fn location(&self) -> String {
        match self {
            CallbackOutcome::Success { token: Some(token), .. } => format!(
                "{HOME_PATH}?{TOKEN_QUERY_PARAM}={}",
                urlencoding::encode(token)
            ),
            CallbackOutcome::Success { token: None, .. } => HOME_PATH.to_string(),
            CallbackOutcome::Failure(code) => {
                format!("{UNAUTHORIZED_PATH}?{ERROR_QUERY_PARAM}={code}")
            }
        }
    }

    /// Headers to put on the redirect response.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let CallbackOutcome::Success { set_cookie, .. } = self {
            for value in set_cookie {
                headers.append(SET_COOKIE, value.clone());
            }
        }
        headers
    }

    pub fn error_code(&self) -> Option<AuthErrorCode> {
        match self {
            CallbackOutcome::Failure(code) => Some(*code),
            CallbackOutcome::Success { .. } => None,
        }
    }
}

/// Drive the callback: exchange `code`, then translate the backend response
/// into cookies for the redirect plus a token for the client store.
///
/// Never fails; every error becomes [`CallbackOutcome::Failure`].
#[tracing::instrument(skip_all)]
pub async fn handle_callback(gateway: &ExchangeGateway, code: Option<&str>) -> CallbackOutcome {
    match relay_credential(gateway, code).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("OAuth callback failed: {}", e);
            CallbackOutcome::Failure(e.code())
        }
    }
}

async fn relay_credential(
    gateway: &ExchangeGateway,
    code: Option<&str>,
) -> Result<CallbackOutcome, RelayError> {
    let code = code
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(RelayError::MissingCode)?;

    let result = gateway.exchange(code).await?;
    if !result.success {
        return Err(RelayError::Rejected);
    }

    let token = extract_cookie_value(&result.set_cookie, AUTH_COOKIE_NAME.as_str())
        .or(result.bearer_token);

    match &token {
        Some(token) => tracing::debug!("Relaying credential {} to client", redact(token)),
        None => tracing::warn!(
            "No '{}' cookie in exchange response; session is cookie-only",
            AUTH_COOKIE_NAME.as_str()
        ),
    }

    Ok(CallbackOutcome::Success {
        set_cookie: result.set_cookie,
        token,
    })
}
