//! Session persistence over a string key/value store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser cookies, the SSR request cookie jar, the CLI session file and the
//! in-memory test store all implement [`SessionStore`]. The rules for what
//! counts as a session live in the free functions below so the server guard
//! and the browser controller cannot disagree.
//!
//! ORDERING
//! ========
//! Readers only accept a session when both `token` and `user` are present.
//! Persisting drops the old `user`, writes `token`, then writes `user`, so a
//! reader sees either the old session, no session, or the new one.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{CorruptSession, StoreError};
use crate::types::{Session, User};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const PROFILE_IMAGE_KEY: &str = "profileImage";

/// Every key owned by the session, in clearing order.
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USER_KEY, PROFILE_IMAGE_KEY];

/// String key/value storage for session artifacts.
///
/// Methods take `&self`; implementations use interior mutability the way
/// browser storage does.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`StoreError`] when the value could not be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

impl<T: SessionStore + ?Sized> SessionStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// In-process store used by tests and by builds without a browser.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored entry.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

// =============================================================================
// LIFECYCLE RULES
// =============================================================================

/// Read the stored session without side effects.
///
/// # Errors
///
/// Returns [`CorruptSession`] when exactly one of `token`/`user` is present,
/// the token is blank, or the user record does not parse.
pub fn read_session<S: SessionStore + ?Sized>(store: &S) -> Result<Option<Session>, CorruptSession> {
    match (store.get(TOKEN_KEY), store.get(USER_KEY)) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(CorruptSession::MissingUser),
        (None, Some(_)) => Err(CorruptSession::MissingToken),
        (Some(token), Some(raw_user)) => {
            if token.trim().is_empty() {
                return Err(CorruptSession::EmptyToken);
            }
            let user = serde_json::from_str::<User>(&raw_user)
                .map_err(|e| CorruptSession::UnparseableUser(e.to_string()))?;
            Ok(Some(Session { token, user }))
        }
    }
}

/// Load the stored session, discarding corrupt artifacts.
///
/// Never fails: absent and corrupt storage both yield `None`, and corrupt
/// storage is cleared before returning.
pub fn load_session<S: SessionStore + ?Sized>(store: &S) -> Option<Session> {
    match read_session(store) {
        Ok(session) => session,
        Err(reason) => {
            discard_corrupt(store, &reason);
            None
        }
    }
}

/// Clear storage after a failed read.
pub fn discard_corrupt<S: SessionStore + ?Sized>(store: &S, reason: &CorruptSession) {
    tracing::warn!(%reason, "discarding corrupt stored session");
    clear_session(store);
}

/// Replace the stored session with `session`.
///
/// The old `user` is removed before the new `token` lands and the new `user`
/// is written last, so at no point do the slots hold a token and a user from
/// different sessions. On failure the previous session is put back; if that
/// also fails both slots are cleared.
///
/// # Errors
///
/// Returns [`StoreError`] when serialization or either write fails.
pub fn persist_session<S: SessionStore + ?Sized>(store: &S, session: &Session) -> Result<(), StoreError> {
    let user = serde_json::to_string(&session.user).map_err(|e| StoreError::Serialize(e.to_string()))?;
    let previous_token = store.get(TOKEN_KEY);
    let previous_user = store.get(USER_KEY);

    store.remove(USER_KEY);
    if let Err(err) = store.set(TOKEN_KEY, &session.token) {
        // The token slot still holds the previous token.
        restore_user(store, previous_user.as_deref());
        return Err(err);
    }
    if let Err(err) = store.set(USER_KEY, &user) {
        let token_restored = previous_token
            .as_deref()
            .is_some_and(|token| store.set(TOKEN_KEY, token).is_ok());
        if token_restored {
            restore_user(store, previous_user.as_deref());
        } else {
            store.remove(TOKEN_KEY);
        }
        return Err(err);
    }
    Ok(())
}

fn restore_user<S: SessionStore + ?Sized>(store: &S, previous: Option<&str>) {
    let Some(user) = previous else { return };
    if let Err(err) = store.set(USER_KEY, user) {
        tracing::warn!(error = %err, "could not restore previous session; clearing");
        store.remove(TOKEN_KEY);
    }
}

/// Remove every session artifact. Idempotent.
pub fn clear_session<S: SessionStore + ?Sized>(store: &S) {
    for key in SESSION_KEYS {
        store.remove(key);
    }
    tracing::debug!("session storage cleared");
}
