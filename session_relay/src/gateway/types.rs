use http::HeaderValue;
use serde::Deserialize;

/// Outcome of one completed code exchange.
///
/// Consumed immediately by the credential relay and never stored.
#[derive(Debug, Clone)]
pub struct ExchangeResult {
    pub success: bool,
    /// Every `Set-Cookie` value the backend emitted, verbatim and in order
    pub set_cookie: Vec<HeaderValue>,
    /// Bearer token the backend placed in the response body, if any
    pub bearer_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ExchangeResponseBody {
    #[serde(default)]
    pub(super) success: Option<bool>,
    #[serde(default)]
    pub(super) set_cookie: Option<SetCookieField>,
    #[serde(default, alias = "accessToken")]
    pub(super) token: Option<String>,
}

/// Some backends echo the cookie in the body as a single string, others as a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SetCookieField {
    One(String),
    Many(Vec<String>),
}

impl SetCookieField {
    pub(super) fn into_vec(self) -> Vec<String> {
        match self {
            SetCookieField::One(s) => vec![s],
            SetCookieField::Many(v) => v,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// Upstream identity-provider sign-out URL
    #[serde(default, alias = "logoutUrl")]
    pub workos_logout_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_body_with_cookie_string() {
        let body: ExchangeResponseBody = serde_json::from_str(
            r#"{"success":true,"user":{"id":"u1"},"setCookie":"auth_token=abc; Path=/"}"#,
        )
        .unwrap();
        assert_eq!(body.success, Some(true));
        assert_eq!(
            body.set_cookie.unwrap().into_vec(),
            vec!["auth_token=abc; Path=/".to_string()]
        );
        assert!(body.token.is_none());
    }

    #[test]
    fn test_exchange_body_with_cookie_list_and_access_token() {
        let body: ExchangeResponseBody = serde_json::from_str(
            r#"{"setCookie":["a=1","auth_token=x"],"accessToken":"tok"}"#,
        )
        .unwrap();
        assert_eq!(body.success, None);
        assert_eq!(body.set_cookie.unwrap().into_vec().len(), 2);
        assert_eq!(body.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_logout_response_upstream_url() {
        let resp: LogoutResponse = serde_json::from_str(
            r#"{"success":true,"message":"Logged out successfully","workosLogoutUrl":"https://idp.example/logout"}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(
            resp.workos_logout_url.as_deref(),
            Some("https://idp.example/logout")
        );

        let resp: LogoutResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.workos_logout_url.is_none());
        assert!(resp.message.is_empty());
    }
}
