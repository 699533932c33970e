use std::convert::Infallible;

use axum::{
    RequestPartsExt,
    extract::FromRequestParts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{TypedHeader, headers};
use http::{Method, StatusCode, request::Parts};

use session_relay::{AUTH_COOKIE_NAME, DisplayIdentity, IDP_LOGIN_URL, resolve, resolve_from_headers};

/// Rejection of [`RequireSession`]: GET requests go to the login URL, other
/// methods get a bare 401.
pub struct LoginRedirect {
    method: Method,
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        if self.method == Method::GET {
            tracing::debug!("Redirecting to {}", IDP_LOGIN_URL.as_str());
            Redirect::to(IDP_LOGIN_URL.as_str()).into_response()
        } else {
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

/// The display identity of the current request, if the auth cookie decodes.
///
/// Never rejects. Use it to render the signed-in user; it proves nothing.
///
/// ```no_run
/// use session_relay_axum::SessionIdentity;
///
/// async fn home(SessionIdentity(identity): SessionIdentity) -> String {
///     match identity {
///         Some(identity) => format!("Welcome back, {}", identity.greeting_name()),
///         None => "Welcome".to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionIdentity(pub Option<DisplayIdentity>);

impl<S> FromRequestParts<S> for SessionIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_from_headers(&parts.headers)))
    }
}

/// Page-level session check for deployments where the gate middleware is off.
///
/// Rejects with [`LoginRedirect`] when the auth cookie is missing or does not
/// decode. Like [`SessionIdentity`] this only reads the cookie; the backend
/// still authorizes every call made with it.
#[derive(Debug, Clone)]
pub struct RequireSession(pub DisplayIdentity);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let method = parts.method.clone();
        let cookies: TypedHeader<headers::Cookie> = parts.extract().await.map_err(|_| {
            tracing::debug!("No cookies on request");
            LoginRedirect {
                method: method.clone(),
            }
        })?;

        cookies
            .get(AUTH_COOKIE_NAME.as_str())
            .and_then(resolve)
            .map(Self)
            .ok_or_else(|| {
                tracing::debug!("No usable session cookie");
                LoginRedirect { method }
            })
    }
}
