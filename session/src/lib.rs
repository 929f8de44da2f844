//! Client-side session lifecycle shared by the web client, SSR host and CLI.
//!
//! This crate owns the single path through which a Splito client submits
//! credentials, persists the returned token and user record, reads them back,
//! clears them on logout, and decides whether a route may render. Browser,
//! server and CLI front-ends plug in their own [`SessionStore`] and
//! [`AuthApi`] implementations; everything else is shared.
//!
//! ARCHITECTURE
//! ============
//! - `types` / `credentials` / `profile`: data model and form validation.
//! - `api`: the AuthAPI seam plus typed decoding of its reply envelope.
//! - `store`: key/value persistence seam and the load/persist/clear rules.
//! - `controller`: the stateful [`SessionController`].
//! - `guard`: pure pre-render route decisions.
//! - `cookie`: cookie string codec shared by browser and server.

pub mod api;
pub mod controller;
pub mod cookie;
pub mod credentials;
pub mod error;
pub mod guard;
#[cfg(feature = "http")]
pub mod http;
pub mod profile;
pub mod store;
pub mod types;

pub use api::{ApiReply, AuthApi};
pub use controller::{SessionController, SessionPhase};
pub use credentials::{CredentialKind, CredentialRequest, LoginForm, SignupForm};
pub use error::{CorruptSession, SessionError, StoreError, TransportError, ValidationError};
pub use guard::GuardDecision;
pub use profile::{ProfileImage, ProfileUpdate};
pub use store::{MemoryStore, SessionStore};
pub use types::{Session, User};
