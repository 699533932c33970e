use chrono::{Duration, Utc};
use http::HeaderMap;

use crate::config::{AUTH_COOKIE_NAME, SESSION_MAX_AGE};
use crate::utils::{UtilError, header_set_cookie};

use super::allow_list::AllowList;
use super::config::{IDP_LOGIN_URL, REQUEST_GATE_ENABLED, UNAUTHENTICATED_PATHS};

/// Request gate configuration, fixed at process start.
#[derive(Debug, Clone)]
pub struct GateSettings {
    pub enabled: bool,
    pub allow_list: AllowList,
    pub login_url: String,
}

impl GateSettings {
    /// Settings from `REQUEST_GATE_ENABLED`, `UNAUTHENTICATED_PATHS` and `IDP_LOGIN_URL`
    pub fn from_env() -> Self {
        Self {
            enabled: *REQUEST_GATE_ENABLED,
            allow_list: AllowList::new(UNAUTHENTICATED_PATHS.iter()),
            login_url: IDP_LOGIN_URL.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through. With `refresh_session` the auth cookie is
    /// re-issued on the response with a renewed lifetime.
    Pass { refresh_session: bool },
    RedirectToLogin(String),
}

/// Per-request pass/redirect decision.
///
/// | allow-listed | enabled | cookie | decision |
/// |---|---|---|---|
/// | yes | any | any | pass |
/// | no | yes | no | redirect to login |
/// | no | yes | yes | pass |
/// | no | no | any | pass |
///
/// Only the presence of the cookie is checked; the backend decides whether it
/// is still valid.
#[derive(Debug, Clone)]
pub struct RequestGate {
    settings: GateSettings,
}

impl RequestGate {
    pub fn new(settings: GateSettings) -> Self {
        Self { settings }
    }

    pub fn from_env() -> Self {
        Self::new(GateSettings::from_env())
    }

    pub fn settings(&self) -> &GateSettings {
        &self.settings
    }

    pub fn decide(&self, path: &str, has_session_cookie: bool) -> GateDecision {
        let pass = GateDecision::Pass {
            refresh_session: has_session_cookie,
        };

        if !self.settings.enabled || has_session_cookie {
            return pass;
        }
        if self.settings.allow_list.is_allowed(path) || self.is_login_path(path) {
            return pass;
        }

        tracing::debug!("No session for gated path {}, redirecting to login", path);
        GateDecision::RedirectToLogin(self.settings.login_url.clone())
    }

    /// A login URL served by this app must stay reachable without a session.
    fn is_login_path(&self, path: &str) -> bool {
        let login = self.settings.login_url.as_str();
        login.starts_with('/') && login.split('?').next() == Some(path)
    }
}

/// Headers re-issuing the auth cookie `credential` with a renewed lifetime
/// of `SESSION_MAX_AGE` seconds.
pub fn refresh_session_cookie(credential: &str) -> Result<HeaderMap, UtilError> {
    let mut headers = HeaderMap::new();
    let max_age = *SESSION_MAX_AGE;
    header_set_cookie(
        &mut headers,
        AUTH_COOKIE_NAME.as_str(),
        credential,
        Utc::now() + Duration::seconds(max_age),
        max_age,
    )?;
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::SET_COOKIE;

    fn gate(enabled: bool) -> RequestGate {
        RequestGate::new(GateSettings {
            enabled,
            allow_list: AllowList::new(["/", "/callback", "/unauthorize", "/public/*"]),
            login_url: "https://idp.example.com/login".to_string(),
        })
    }

    #[test]
    fn test_allow_listed_path_without_cookie_passes() {
        assert_eq!(
            gate(true).decide("/callback", false),
            GateDecision::Pass {
                refresh_session: false
            }
        );
        assert_eq!(
            gate(true).decide("/public/logo.svg", false),
            GateDecision::Pass {
                refresh_session: false
            }
        );
    }

    #[test]
    fn test_gated_path_without_cookie_redirects_to_login() {
        assert_eq!(
            gate(true).decide("/dashboard", false),
            GateDecision::RedirectToLogin("https://idp.example.com/login".to_string())
        );
    }

    #[test]
    fn test_gated_path_with_cookie_passes_and_refreshes() {
        assert_eq!(
            gate(true).decide("/dashboard", true),
            GateDecision::Pass {
                refresh_session: true
            }
        );
    }

    #[test]
    fn test_disabled_gate_always_passes() {
        assert_eq!(
            gate(false).decide("/dashboard", false),
            GateDecision::Pass {
                refresh_session: false
            }
        );
        assert_eq!(
            gate(false).decide("/dashboard", true),
            GateDecision::Pass {
                refresh_session: true
            }
        );
    }

    #[test]
    fn test_local_login_path_is_never_gated() {
        let gate = RequestGate::new(GateSettings {
            enabled: true,
            allow_list: AllowList::new(["/"]),
            login_url: "/login?next=/".to_string(),
        });
        assert_eq!(
            gate.decide("/login", false),
            GateDecision::Pass {
                refresh_session: false
            }
        );
        assert!(matches!(
            gate.decide("/account", false),
            GateDecision::RedirectToLogin(url) if url == "/login?next=/"
        ));
    }

    #[test]
    fn test_refresh_session_cookie() {
        let headers = refresh_session_cookie("h.p.s").unwrap();
        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with(&format!("{}=h.p.s;", AUTH_COOKIE_NAME.as_str())));
        assert!(cookie.contains(&format!("Max-Age={}", *SESSION_MAX_AGE)));
        assert!(cookie.contains("HttpOnly"));
    }
}
