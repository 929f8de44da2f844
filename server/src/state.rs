//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and middleware via the `State`
//! extractor. It holds the parsed configuration and one pooled AuthAPI
//! client used for optional token validation.

use std::sync::Arc;

use session::TransportError;
use session::http::HttpAuthApi;

use crate::config::ServerConfig;

/// Clone is required by Axum; inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub auth_api: Arc<HttpAuthApi>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns [`TransportError`] if the HTTP client cannot be built.
    pub fn new(config: ServerConfig) -> Result<Self, TransportError> {
        let auth_api = HttpAuthApi::new(config.auth_api_url.clone(), config.auth_timeout)?;
        tracing::info!(
            auth_api = %config.auth_api_url,
            validate_tokens = config.validate_tokens,
            "auth api configured"
        );
        Ok(Self { config: Arc::new(config), auth_api: Arc::new(auth_api) })
    }

    /// AuthAPI client for guard validation, when enabled.
    pub fn validator(&self) -> Option<&HttpAuthApi> {
        self.config.validate_tokens.then_some(&*self.auth_api)
    }
}
