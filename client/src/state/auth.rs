//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The session itself is owned by the
//! controller; this is the reactive mirror that views subscribe to.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use session::{Session, User};

/// Authentication state tracking the current session and loading status.
///
/// `loading` is true until the browser has read its cookies once, so SSR and
/// the first hydrate pass render the same placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::pending()
    }
}

impl AuthState {
    /// Before the first storage read.
    pub fn pending() -> Self {
        Self { session: None, loading: true }
    }

    /// After a storage read, login, logout or profile save.
    pub fn resolved(session: Option<Session>) -> Self {
        Self { session, loading: false }
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}
