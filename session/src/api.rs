//! AuthAPI seam and reply decoding.
//!
//! DESIGN
//! ======
//! Transports only move bytes: they return the raw status and body, or a
//! [`TransportError`] when the call never completed. Interpreting the reply
//! envelope happens exactly once, here, so every front-end classifies a
//! malformed or partial success the same way.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use serde::Deserialize;

use crate::credentials::{CredentialKind, LoginCredentials, RegisterCredentials};
use crate::error::{MISSING_SESSION_DATA_MESSAGE, SessionError, TransportError};
use crate::profile::ProfileUpdate;
use crate::types::{Session, User};

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const REGISTER_ENDPOINT: &str = "/auth/register";
pub const VALIDATE_ENDPOINT: &str = "/auth/validate";
pub const UPDATE_PROFILE_ENDPOINT: &str = "/users/update-profile";

/// Default AuthAPI base URL for local development.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Join an API base URL and an endpoint path.
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// A completed HTTP exchange with the AuthAPI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Remote authentication service.
///
/// Implementations must bound each call in time and report an expired bound
/// as [`TransportError::Timeout`].
pub trait AuthApi {
    /// `POST /auth/login`.
    fn login(&self, credentials: &LoginCredentials) -> impl Future<Output = Result<ApiReply, TransportError>>;

    /// `POST /auth/register`.
    fn register(&self, credentials: &RegisterCredentials) -> impl Future<Output = Result<ApiReply, TransportError>>;

    /// `GET /auth/validate` with a bearer token; `true` for a 2xx reply.
    fn validate(&self, token: &str) -> impl Future<Output = Result<bool, TransportError>>;

    /// `PUT /users/update-profile` with a bearer token.
    fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<ApiReply, TransportError>>;
}

impl<T: AuthApi + ?Sized> AuthApi for &T {
    fn login(&self, credentials: &LoginCredentials) -> impl Future<Output = Result<ApiReply, TransportError>> {
        (**self).login(credentials)
    }

    fn register(&self, credentials: &RegisterCredentials) -> impl Future<Output = Result<ApiReply, TransportError>> {
        (**self).register(credentials)
    }

    fn validate(&self, token: &str) -> impl Future<Output = Result<bool, TransportError>> {
        (**self).validate(token)
    }

    fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<ApiReply, TransportError>> {
        (**self).update_profile(token, update)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<EnvelopeData>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<serde_json::Value>,
}

impl Envelope {
    fn server_message(&self) -> Option<String> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decode a login/register reply into a session.
///
/// Success requires a 2xx status, a decodable body whose `success` flag is
/// true, a non-empty token, and a well-formed user record.
///
/// # Errors
///
/// Returns [`SessionError::Authentication`] carrying the server's message when
/// present, otherwise the kind's generic fallback.
pub fn decode_auth_reply(kind: CredentialKind, reply: &ApiReply) -> Result<Session, SessionError> {
    let failure = |message: Option<String>| SessionError::Authentication {
        status: reply.status,
        message: message.unwrap_or_else(|| kind.failure_fallback().to_owned()),
    };

    let Ok(envelope) = serde_json::from_str::<Envelope>(&reply.body) else {
        return Err(failure(None));
    };
    if !reply.is_success() || !envelope.success {
        return Err(failure(envelope.server_message()));
    }

    let missing = || failure(Some(MISSING_SESSION_DATA_MESSAGE.to_owned()));
    let data = envelope.data.ok_or_else(missing)?;
    let token = data.token.filter(|t| !t.trim().is_empty()).ok_or_else(missing)?;
    let user = data
        .user
        .and_then(|raw| serde_json::from_value::<User>(raw).ok())
        .ok_or_else(missing)?;

    Ok(Session { token, user })
}

/// Decode a reply that only acknowledges success (profile updates).
///
/// # Errors
///
/// Returns [`SessionError::Authentication`] with the server's message or
/// `fallback` when the status is not 2xx or `success` is not true.
pub fn decode_ack_reply(reply: &ApiReply, fallback: &str) -> Result<(), SessionError> {
    let envelope = serde_json::from_str::<Envelope>(&reply.body).ok();
    let accepted = reply.is_success() && envelope.as_ref().is_some_and(|e| e.success);
    if accepted {
        return Ok(());
    }
    Err(SessionError::Authentication {
        status: reply.status,
        message: envelope
            .and_then(|e| e.server_message())
            .unwrap_or_else(|| fallback.to_owned()),
    })
}
