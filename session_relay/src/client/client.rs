use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::BACKEND_API_URL;
use crate::store::{SessionStorage, TokenStore};

use super::errors::ClientError;
use super::types::{ErrorBody, ProfileUpdate, UserProfile, UserProfileResponse};

const USER_PROFILE_ENDPOINT: &str = "/api/user/profile";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend client for the script context.
///
/// Every call reads the token from the shared [`TokenStore`] at send time and
/// passes it as `Authorization: Bearer`. Nothing is retried.
pub struct BackendClient<S: SessionStorage> {
    base_url: String,
    client: reqwest::Client,
    store: Arc<TokenStore<S>>,
}

impl<S: SessionStorage> BackendClient<S> {
    pub fn new(base_url: impl Into<String>, store: Arc<TokenStore<S>>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            store,
        })
    }

    /// Client for `BACKEND_API_URL`
    pub fn from_env(store: Arc<TokenStore<S>>) -> Result<Self, ClientError> {
        Self::new(BACKEND_API_URL.as_str(), store)
    }

    fn bearer(&self) -> Result<String, ClientError> {
        self.store.get_token().ok_or(ClientError::NoToken)
    }

    /// `GET /api/user/profile`
    pub async fn user_profile(&self) -> Result<UserProfile, ClientError> {
        let token = self.bearer()?;
        let response = self
            .client
            .get(format!("{}{}", self.base_url, USER_PROFILE_ENDPOINT))
            .bearer_auth(token)
            .send()
            .await?;
        let body: UserProfileResponse = read_json(response).await?;
        Ok(body.user)
    }

    /// `PUT /api/user/profile`
    pub async fn update_user_profile(
        &self,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ClientError> {
        let token = self.bearer()?;
        let response = self
            .client
            .put(format!("{}{}", self.base_url, USER_PROFILE_ENDPOINT))
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;
        let body: UserProfileResponse = read_json(response).await?;
        Ok(body.user)
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        tracing::debug!("Backend rejected the stored access token");
        return Err(ClientError::TokenExpired);
    }
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or(text);
        tracing::error!("Backend call failed: {} {}", status, message);
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}
