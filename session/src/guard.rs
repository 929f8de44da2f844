//! Pre-render route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The SSR middleware and the client router both call [`guard`] before a page
//! renders. A path is public only if it appears in [`PUBLIC_PATHS`]; every
//! other page needs a session. Signed-in users may still open the login and
//! signup pages.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::types::Session;

pub const LANDING_PATH: &str = "/";
pub const AUTH_INDEX_PATH: &str = "/authentication";
pub const LOGIN_PATH: &str = "/authentication/login";
pub const SIGNUP_PATH: &str = "/authentication/signup";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const PROFILE_PATH: &str = "/profile";

/// Query parameter carrying the originally requested path.
pub const RETURN_PARAM: &str = "from";

/// Pages reachable without a session.
pub const PUBLIC_PATHS: [&str; 4] = [LANDING_PATH, AUTH_INDEX_PATH, LOGIN_PATH, SIGNUP_PATH];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Protected,
}

/// Outcome of a guard check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Navigate to this location instead of rendering.
    Redirect(String),
}

impl GuardDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Strip query, fragment and trailing slashes. `""` becomes `"/"`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { LANDING_PATH } else { trimmed }
}

#[must_use]
pub fn classify(path: &str) -> RouteAccess {
    if PUBLIC_PATHS.contains(&normalize_path(path)) {
        RouteAccess::Public
    } else {
        RouteAccess::Protected
    }
}

/// Decide whether `path` may render for the given session.
#[must_use]
pub fn guard(path: &str, session: Option<&Session>) -> GuardDecision {
    match (classify(path), session) {
        (RouteAccess::Public, _) | (RouteAccess::Protected, Some(_)) => GuardDecision::Allow,
        (RouteAccess::Protected, None) => GuardDecision::Redirect(login_redirect(path)),
    }
}

/// Login URL that returns to `from` after a successful sign-in.
#[must_use]
pub fn login_redirect(from: &str) -> String {
    format!("{LOGIN_PATH}?{RETURN_PARAM}={}", urlencoding::encode(normalize_path(from)))
}

/// Where to go after a successful sign-in.
///
/// `from` is the already-decoded `from` query value. Only local, protected
/// paths are honoured; anything else falls back to the dashboard.
#[must_use]
pub fn return_target(from: Option<&str>) -> String {
    from.map(str::trim)
        .filter(|p| is_local_path(p) && classify(p) == RouteAccess::Protected)
        .map_or_else(|| DASHBOARD_PATH.to_owned(), |p| normalize_path(p).to_owned())
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') && !path.contains("://")
}
