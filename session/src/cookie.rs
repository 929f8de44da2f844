//! Session cookie construction and lookup for `token` and `user`.
//!
//! Both sides speak the `cookie` crate: the browser store serializes the
//! cookies built here into `document.cookie` assignments and reads them back
//! through [`find_cookie`], and the SSR guard hands the same [`Cookie`]
//! values to its `CookieJar`. Values are percent-encoded so a JSON user
//! record survives the cookie grammar.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

use ::cookie::{Cookie, SameSite};
use time::Duration;

/// Seven days.
pub const DEFAULT_MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;

/// Attributes applied to every session cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CookieAttributes {
    pub max_age_secs: u64,
    pub secure: bool,
}

impl CookieAttributes {
    #[must_use]
    pub fn max_age(&self) -> Duration {
        Duration::seconds(i64::try_from(self.max_age_secs).unwrap_or(i64::MAX))
    }
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self { max_age_secs: DEFAULT_MAX_AGE_SECS, secure: false }
    }
}

/// Build the cookie that stores `value` under `name`.
#[must_use]
pub fn session_cookie(name: &str, value: &str, attrs: CookieAttributes) -> Cookie<'static> {
    Cookie::build((name.to_owned(), value.to_owned()))
        .path("/")
        .max_age(attrs.max_age())
        .same_site(SameSite::Lax)
        .secure(attrs.secure)
        .build()
}

/// Build a cookie that deletes `name`.
///
/// Uses `Max-Age=0` only; no `Expires` date is computed, so this is safe to
/// call where the wall clock is unavailable.
#[must_use]
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_owned(), String::new()))
        .path("/")
        .max_age(Duration::ZERO)
        .same_site(SameSite::Lax)
        .build()
}

/// Percent-encoded `Set-Cookie` / `document.cookie` assignment.
#[must_use]
pub fn set_cookie(name: &str, value: &str, attrs: CookieAttributes) -> String {
    session_cookie(name, value, attrs).encoded().to_string()
}

/// Assignment that deletes `name`.
#[must_use]
pub fn expire_cookie(name: &str) -> String {
    removal_cookie(name).encoded().to_string()
}

/// Find and decode `name` in a `Cookie` header or `document.cookie` string.
///
/// Empty values are treated as absent, matching how browsers leave an
/// expired cookie behind as `name=`. Pairs that fail to decode are skipped.
#[must_use]
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse_encoded(header)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}
