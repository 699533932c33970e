use http::HeaderValue;
use http::header::{AUTHORIZATION, COOKIE, SET_COOKIE};
use serde_json::json;
use std::time::Duration;

use crate::config::{AUTH_COOKIE_NAME, BACKEND_API_URL};
use crate::utils::redact;

use super::config::{EXCHANGE_ENDPOINT, EXCHANGE_TIMEOUT, LOGOUT_ENDPOINT};
use super::errors::GatewayError;
use super::types::{ExchangeResponseBody, ExchangeResult, LogoutResponse};

/// Server-side client for the backend's token issuance endpoints.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ExchangeGateway {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeGateway {
    /// Creates a gateway with the following client settings:
    ///
    /// - `timeout`: every call is bounded; a timed out exchange surfaces as
    ///   [`GatewayError::Network`] and is never retried (OAuth codes are single use).
    /// - `pool_idle_timeout`: 90 seconds.
    /// - `pool_max_idle_per_host`: 32.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(32)
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Gateway for `BACKEND_API_URL` with `EXCHANGE_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::new(BACKEND_API_URL.as_str(), *EXCHANGE_TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Trade a one-time OAuth `code` for a session credential.
    ///
    /// All `Set-Cookie` headers of the backend response are returned verbatim
    /// so the caller can forward them untouched.
    #[tracing::instrument(skip_all, fields(backend = %self.base_url))]
    pub async fn exchange(&self, code: &str) -> Result<ExchangeResult, GatewayError> {
        let url = format!("{}{}", self.base_url, EXCHANGE_ENDPOINT);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "code": code }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Code exchange request failed: {}", e);
                GatewayError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Backend exchange failed: {} {}", status, body);
            return Err(GatewayError::Exchange {
                status: status.as_u16(),
                body,
            });
        }

        let mut set_cookie: Vec<HeaderValue> =
            response.headers().get_all(SET_COOKIE).iter().cloned().collect();

        let bytes = response.bytes().await?;
        let body: ExchangeResponseBody = if bytes.is_empty() {
            ExchangeResponseBody::default()
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Exchange response body is not the expected JSON: {}", e);
                ExchangeResponseBody::default()
            })
        };

        if set_cookie.is_empty() {
            if let Some(field) = body.set_cookie {
                for line in field.into_vec() {
                    match HeaderValue::from_str(&line) {
                        Ok(value) => set_cookie.push(value),
                        Err(e) => tracing::warn!("Dropping unusable setCookie entry: {}", e),
                    }
                }
            }
        }

        tracing::debug!(
            "Exchange succeeded with {} Set-Cookie entries",
            set_cookie.len()
        );

        Ok(ExchangeResult {
            success: body.success.unwrap_or(true),
            set_cookie,
            bearer_token: body.token.filter(|t| !t.is_empty()),
        })
    }

    /// Tell the backend to end the session identified by `credential`.
    ///
    /// The credential is sent both as the auth cookie and as a bearer token.
    #[tracing::instrument(skip_all, fields(backend = %self.base_url))]
    pub async fn logout(&self, credential: Option<&str>) -> Result<LogoutResponse, GatewayError> {
        let url = format!("{}{}", self.base_url, LOGOUT_ENDPOINT);
        let mut request = self.client.post(&url).json(&json!({}));

        if let Some(credential) = credential {
            tracing::debug!("Forwarding credential {} to logout", redact(credential));
            request = request
                .header(COOKIE, format!("{}={}", AUTH_COOKIE_NAME.as_str(), credential))
                .header(AUTHORIZATION, format!("Bearer {credential}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Logout {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<LogoutResponse>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}
