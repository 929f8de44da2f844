//! Build-time client configuration.
//!
//! The AuthAPI base URL is baked in at compile time from `SPLITO_API_URL`
//! because the WASM bundle has no process environment to read at runtime.

use session::api::DEFAULT_API_BASE_URL;
use session::cookie::DEFAULT_MAX_AGE_SECS;

/// AuthAPI base URL, e.g. `http://localhost:5000/api`.
pub const API_BASE_URL: &str = match option_env!("SPLITO_API_URL") {
    Some(url) => url,
    None => DEFAULT_API_BASE_URL,
};

/// Upper bound on a single AuthAPI call from the browser.
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Lifetime of the `token` and `user` cookies.
pub const SESSION_MAX_AGE_SECS: u64 = DEFAULT_MAX_AGE_SECS;
