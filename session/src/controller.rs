//! Stateful session controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views never touch storage directly. They submit credentials, load, clear
//! and guard through one [`SessionController`], which owns the phase machine:
//!
//! ```text
//! Anonymous --submit ok--> Authenticated --clear--> Anonymous
//! Anonymous --submit err--> Anonymous
//! any --load finds corrupt data--> Invalid --auto clear--> Anonymous
//! ```
//!
//! CONCURRENCY
//! ===========
//! Single-threaded and cooperative. While a submission is awaiting the
//! AuthAPI the phase is `Authenticating`; a second submit fails fast with
//! [`SessionError::Busy`] instead of racing on the persisted session. The
//! session is fully written before `submit` resolves, so a guard check made
//! right after navigation always observes it.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::Cell;

use crate::api::{self, AuthApi};
use crate::credentials::{CredentialPayload, CredentialRequest};
use crate::error::{PROFILE_UPDATE_FAILED_MESSAGE, SessionError};
use crate::guard::{self, GuardDecision};
use crate::profile::{ProfileImage, ProfileUpdate};
use crate::store::{self, PROFILE_IMAGE_KEY, SessionStore};
use crate::types::Session;

/// Lifecycle phase of the client's authentication state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    /// Corrupt storage was detected; resolves to `Anonymous` once cleared.
    Invalid,
}

/// Single access point to the persisted session.
pub struct SessionController<S, A> {
    store: S,
    api: A,
    phase: Cell<SessionPhase>,
}

impl<S: SessionStore, A: AuthApi> SessionController<S, A> {
    /// Start `Anonymous` until [`Self::load`] proves otherwise.
    pub fn new(store: S, api: A) -> Self {
        Self { store, api, phase: Cell::new(SessionPhase::Anonymous) }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase.get()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Validate, send and persist a login or registration.
    ///
    /// On failure the previously persisted session (if any) is untouched.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Busy`] while another submission is in flight.
    /// - [`SessionError::Validation`] before any network call.
    /// - [`SessionError::Transport`] when the call did not complete.
    /// - [`SessionError::Authentication`] for rejected or incomplete replies.
    /// - [`SessionError::Store`] when the session could not be written.
    pub async fn submit(&self, request: CredentialRequest) -> Result<Session, SessionError> {
        if self.phase.get() == SessionPhase::Authenticating {
            return Err(SessionError::Busy);
        }
        let kind = request.kind();
        let payload = request.into_payload()?;

        let mut flight = InFlight::begin(&self.phase);
        let reply = match &payload {
            CredentialPayload::Login(credentials) => self.api.login(credentials).await,
            CredentialPayload::Register(credentials) => self.api.register(credentials).await,
        }
        .inspect_err(|err| tracing::warn!(kind = kind.as_str(), error = %err, "auth request did not complete"))?;

        let session = api::decode_auth_reply(kind, &reply)
            .inspect_err(|err| tracing::info!(kind = kind.as_str(), error = %err, "auth request rejected"))?;
        store::persist_session(&self.store, &session)?;
        flight.settle(SessionPhase::Authenticated);

        tracing::info!(kind = kind.as_str(), user_id = %session.user.id, "session established");
        Ok(session)
    }

    /// Persist an externally obtained session.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError`] when the write fails.
    pub fn persist(&self, session: &Session) -> Result<(), crate::StoreError> {
        store::persist_session(&self.store, session)?;
        self.phase.set(SessionPhase::Authenticated);
        Ok(())
    }

    /// Current session, or `None`. Corrupt storage is cleared silently.
    pub fn load(&self) -> Option<Session> {
        let session = match store::read_session(&self.store) {
            Ok(session) => session,
            Err(reason) => {
                self.phase.set(SessionPhase::Invalid);
                store::discard_corrupt(&self.store, &reason);
                self.phase.set(SessionPhase::Anonymous);
                None
            }
        };
        if self.phase.get() != SessionPhase::Authenticating {
            self.phase.set(if session.is_some() {
                SessionPhase::Authenticated
            } else {
                SessionPhase::Anonymous
            });
        }
        session
    }

    /// Remove the session and its cached artifacts. Idempotent.
    pub fn clear(&self) {
        store::clear_session(&self.store);
        if self.phase.get() != SessionPhase::Authenticating {
            self.phase.set(SessionPhase::Anonymous);
        }
        tracing::info!("session cleared");
    }

    /// Pre-render decision for `path` against the stored session.
    pub fn guard(&self, path: &str) -> GuardDecision {
        guard::guard(path, self.load().as_ref())
    }

    /// Ask the AuthAPI whether the stored token is still valid.
    ///
    /// A rejected token clears the session. Without a session this is
    /// `Ok(false)` and no call is made.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] when the call did not complete; the
    /// session is kept in that case.
    pub async fn validate(&self) -> Result<bool, SessionError> {
        let Some(session) = self.load() else {
            return Ok(false);
        };
        let valid = self.api.validate(&session.token).await?;
        if !valid {
            tracing::info!(user_id = %session.user.id, "stored token rejected");
            self.clear();
        }
        Ok(valid)
    }

    /// Send a profile edit and re-persist the cached user on success.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoSession`] without a stored session.
    /// - [`SessionError::Validation`] for a blank username or email.
    /// - [`SessionError::Transport`] / [`SessionError::Authentication`] from the call.
    /// - [`SessionError::Store`] when the updated record could not be written.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Session, SessionError> {
        let session = self.load().ok_or(SessionError::NoSession)?;
        let mut update = update.normalized()?;
        if update.profile_image.is_none() {
            update.profile_image = self.profile_image();
        }

        let reply = self.api.update_profile(&session.token, &update).await?;
        api::decode_ack_reply(&reply, PROFILE_UPDATE_FAILED_MESSAGE)?;

        let updated = Session { user: update.apply_to(session.user), token: session.token };
        self.persist(&updated)?;
        tracing::info!(user_id = %updated.user.id, "profile updated");
        Ok(updated)
    }

    /// Cache an accepted profile image next to the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the write fails.
    pub fn cache_profile_image(&self, image: &ProfileImage) -> Result<(), SessionError> {
        self.store.set(PROFILE_IMAGE_KEY, image.data_url())?;
        Ok(())
    }

    pub fn profile_image(&self) -> Option<String> {
        self.store.get(PROFILE_IMAGE_KEY)
    }
}

/// Holds the phase at `Authenticating` for the duration of a submission and
/// restores the prior phase on drop unless settled.
struct InFlight<'a> {
    phase: &'a Cell<SessionPhase>,
    exit: SessionPhase,
}

impl<'a> InFlight<'a> {
    fn begin(phase: &'a Cell<SessionPhase>) -> Self {
        let exit = phase.replace(SessionPhase::Authenticating);
        Self { phase, exit }
    }

    fn settle(&mut self, exit: SessionPhase) {
        self.exit = exit;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.phase.set(self.exit);
    }
}
