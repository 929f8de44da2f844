//! Error taxonomy for the session lifecycle.
//!
//! ERROR HANDLING
//! ==============
//! `ValidationError` and `SessionError::Authentication` stop at the form
//! boundary and are rendered inline via [`SessionError::user_message`].
//! `CorruptSession` never leaves this crate's load path: it is logged and
//! resolved to "no session".

/// Fallback shown when a login attempt fails without a server message.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";
/// Fallback shown when a registration attempt fails without a server message.
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed. Please try again.";
/// Fallback shown when a profile update fails without a server message.
pub const PROFILE_UPDATE_FAILED_MESSAGE: &str = "Failed to update profile";
/// Shown when the AuthAPI reports success but omits the token or user.
pub const MISSING_SESSION_DATA_MESSAGE: &str = "Missing token or user data in response";
pub const TRANSPORT_MESSAGE: &str = "Could not reach the server. Please try again.";
pub const TIMEOUT_MESSAGE: &str = "The server took too long to respond. Please try again.";

/// Local precondition failure. Never reaches the network.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("You must agree to the terms and conditions")]
    TermsNotAccepted,
    #[error("Please upload an image file")]
    NotAnImage,
    #[error("File size should be less than 5MB")]
    ImageTooLarge,
}

/// The AuthAPI call did not complete.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    /// The transport has no meaning in this build (e.g. SSR stubs).
    #[error("not available in this environment")]
    Unavailable,
}

/// Persisting a session artifact failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("session storage is unavailable")]
    Unavailable,
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to serialize user record: {0}")]
    Serialize(String),
}

/// Locally stored session data that does not form a valid [`crate::Session`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CorruptSession {
    #[error("user record present without token")]
    MissingToken,
    #[error("token present without user record")]
    MissingUser,
    #[error("stored token is empty")]
    EmptyToken,
    #[error("user record failed to parse: {0}")]
    UnparseableUser(String),
}

/// Failure of a session operation, classified for display.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("authentication failed (status {status}): {message}")]
    Authentication { status: u16, message: String },
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),
    #[error("a submission is already in flight")]
    Busy,
    #[error("no active session")]
    NoSession,
    #[error("session storage failed: {0}")]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Message suitable for inline display next to the form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Authentication { message, .. } => message.clone(),
            Self::Transport(TransportError::Timeout) => TIMEOUT_MESSAGE.to_owned(),
            Self::Transport(_) => TRANSPORT_MESSAGE.to_owned(),
            Self::Busy => "Please wait for the current request to finish.".to_owned(),
            Self::NoSession => "Your session has expired. Please log in again.".to_owned(),
            Self::Store(_) => "Could not save your session. Please check your browser settings.".to_owned(),
        }
    }

    /// Whether the failure happened before any network call was issued.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Busy | Self::NoSession)
    }
}
