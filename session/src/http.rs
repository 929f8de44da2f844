//! `reqwest` transport for the AuthAPI, used by the SSR host and the CLI.

use std::time::Duration;

use crate::api::{self, ApiReply, AuthApi};
use crate::credentials::{LoginCredentials, RegisterCredentials};
use crate::error::TransportError;
use crate::profile::ProfileUpdate;

/// Default bound on a single AuthAPI call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// AuthAPI client over HTTP.
#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Build a client for `base_url` (e.g. `http://localhost:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        api::endpoint(&self.base_url, path)
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<ApiReply, TransportError> {
        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;
        Ok(ApiReply { status, body })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}

impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<ApiReply, TransportError> {
        Self::send(self.http.post(self.url(api::LOGIN_ENDPOINT)).json(credentials)).await
    }

    async fn register(&self, credentials: &RegisterCredentials) -> Result<ApiReply, TransportError> {
        Self::send(self.http.post(self.url(api::REGISTER_ENDPOINT)).json(credentials)).await
    }

    async fn validate(&self, token: &str) -> Result<bool, TransportError> {
        let response = self
            .http
            .get(self.url(api::VALIDATE_ENDPOINT))
            .bearer_auth(token)
            .send()
            .await
            .map_err(classify)?;
        Ok(response.status().is_success())
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<ApiReply, TransportError> {
        Self::send(
            self.http
                .put(self.url(api::UPDATE_PROFILE_ENDPOINT))
                .bearer_auth(token)
                .json(update),
        )
        .await
    }
}
