//! View state shared through Leptos context.
//!
//! DESIGN
//! ======
//! Plain data structs wrapped in `RwSignal` by `app::App`. Keeping them free
//! of signals makes them testable without a reactive runtime.

pub mod auth;
pub mod dashboard;
