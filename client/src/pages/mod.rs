//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Protected pages wrap their content in
//! `util::auth::RequireSession`.

pub mod dashboard;
pub mod landing;
pub mod login;
pub mod not_found;
pub mod profile;
pub mod signup;
