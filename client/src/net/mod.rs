//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the browser transport behind the session controller's AuthAPI
//! seam. Reply interpretation stays in the `session` crate.

pub mod api;
