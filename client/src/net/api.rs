//! AuthAPI transport for the browser.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, each raced against
//! a `gloo-timers` timeout.
//! Server-side (SSR): stubs returning `TransportError::Unavailable` since
//! credentials are only ever submitted from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Only transport failures surface here. Status codes and reply bodies are
//! handed back untouched for `session::api` to classify.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use session::api::{self, ApiReply, AuthApi};
use session::credentials::{LoginCredentials, RegisterCredentials};
use session::{ProfileUpdate, TransportError};

use crate::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Post,
    Put,
}

/// AuthAPI client bound to a base URL and a per-request timeout.
#[derive(Clone, Debug)]
pub struct BrowserAuthApi {
    base_url: String,
    timeout_ms: u32,
}

impl Default for BrowserAuthApi {
    fn default() -> Self {
        Self::new(config::API_BASE_URL, config::REQUEST_TIMEOUT_MS)
    }
}

impl BrowserAuthApi {
    pub fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self { base_url: base_url.into(), timeout_ms }
    }

    fn url(&self, path: &str) -> String {
        api::endpoint(&self.base_url, path)
    }

    async fn send_json<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &T,
        token: Option<&str>,
    ) -> Result<ApiReply, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            let url = self.url(path);
            let mut builder = match method {
                Method::Post => gloo_net::http::Request::post(&url),
                Method::Put => gloo_net::http::Request::put(&url),
            };
            if let Some(token) = token {
                builder = builder.header("Authorization", &bearer(token));
            }
            let request = builder.json(body).map_err(|e| TransportError::Network(e.to_string()))?;
            let timeout_ms = self.timeout_ms;
            with_timeout(timeout_ms, async move {
                let response = request.send().await?;
                let status = response.status();
                let body = response.text().await?;
                Ok(ApiReply { status, body })
            })
            .await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (method, self.url(path), body, token, self.timeout_ms);
            Err(TransportError::Unavailable)
        }
    }
}

#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Race `request` against a timer; the timer winning is a timeout.
#[cfg(feature = "hydrate")]
async fn with_timeout<T>(
    timeout_ms: u32,
    request: impl std::future::Future<Output = Result<T, gloo_net::Error>>,
) -> Result<T, TransportError> {
    use futures::future::{Either, select};

    let request = std::pin::pin!(request);
    let timer = std::pin::pin!(gloo_timers::future::TimeoutFuture::new(timeout_ms));
    match select(request, timer).await {
        Either::Left((result, _)) => result.map_err(|e| TransportError::Network(e.to_string())),
        Either::Right(((), _)) => Err(TransportError::Timeout),
    }
}

impl AuthApi for BrowserAuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<ApiReply, TransportError> {
        self.send_json(Method::Post, api::LOGIN_ENDPOINT, credentials, None).await
    }

    async fn register(&self, credentials: &RegisterCredentials) -> Result<ApiReply, TransportError> {
        self.send_json(Method::Post, api::REGISTER_ENDPOINT, credentials, None).await
    }

    async fn validate(&self, token: &str) -> Result<bool, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::get(&self.url(api::VALIDATE_ENDPOINT))
                .header("Authorization", &bearer(token))
                .build()
                .map_err(|e| TransportError::Network(e.to_string()))?;
            with_timeout(self.timeout_ms, async move { request.send().await.map(|r| r.ok()) }).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            Err(TransportError::Unavailable)
        }
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<ApiReply, TransportError> {
        self.send_json(Method::Put, api::UPDATE_PROFILE_ENDPOINT, update, Some(token)).await
    }
}
