//! Browser-backed [`SessionStore`].
//!
//! SYSTEM CONTEXT
//! ==============
//! `token` and `user` are client-readable cookies so the SSR guard sees the
//! same artifacts as the browser. `profileImage` is too large for a cookie
//! and lives in `localStorage`.
//!
//! TRADE-OFFS
//! ==========
//! `document.cookie` assignment never reports failure, so writes are read
//! back and a missing value is surfaced as [`StoreError::Write`]. SSR builds
//! have no browser: reads are empty and writes fail with
//! [`StoreError::Unavailable`].

#[cfg(test)]
#[path = "browser_store_test.rs"]
mod browser_store_test;

use session::cookie::CookieAttributes;
use session::store::{PROFILE_IMAGE_KEY, SessionStore};
use session::StoreError;

use crate::config;

/// Where a session key is kept in the browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Cookie,
    LocalStorage,
}

pub(crate) fn slot_for(key: &str) -> Slot {
    if key == PROFILE_IMAGE_KEY { Slot::LocalStorage } else { Slot::Cookie }
}

/// Cookie attributes for the current page; `Secure` only over https.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub(crate) fn attributes_for(protocol: &str) -> CookieAttributes {
    CookieAttributes { max_age_secs: config::SESSION_MAX_AGE_SECS, secure: protocol == "https:" }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl BrowserStore {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "hydrate")]
mod dom {
    use wasm_bindgen::JsCast as _;

    pub fn document() -> Option<web_sys::HtmlDocument> {
        web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
    }

    pub fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn protocol() -> String {
        web_sys::window()
            .and_then(|w| w.location().protocol().ok())
            .unwrap_or_default()
    }

    pub fn cookie_header() -> Option<String> {
        document()?.cookie().ok()
    }
}

impl SessionStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            match slot_for(key) {
                Slot::Cookie => session::cookie::find_cookie(&dom::cookie_header()?, key),
                Slot::LocalStorage => dom::local_storage()?.get_item(key).ok().flatten(),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = slot_for(key);
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let write_failed = |reason: String| StoreError::Write { key: key.to_owned(), reason };
            match slot_for(key) {
                Slot::Cookie => {
                    let document = dom::document().ok_or(StoreError::Unavailable)?;
                    let assignment = session::cookie::set_cookie(key, value, attributes_for(&dom::protocol()));
                    document
                        .set_cookie(&assignment)
                        .map_err(|e| write_failed(format!("{e:?}")))?;
                    if self.get(key).as_deref() != Some(value) {
                        return Err(write_failed("cookie rejected by the browser".to_owned()));
                    }
                    Ok(())
                }
                Slot::LocalStorage => dom::local_storage()
                    .ok_or(StoreError::Unavailable)?
                    .set_item(key, value)
                    .map_err(|e| write_failed(format!("{e:?}"))),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StoreError::Unavailable)
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            match slot_for(key) {
                Slot::Cookie => {
                    if let Some(document) = dom::document() {
                        let _ = document.set_cookie(&session::cookie::expire_cookie(key));
                    }
                }
                Slot::LocalStorage => {
                    if let Some(storage) = dom::local_storage() {
                        let _ = storage.remove_item(key);
                    }
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}
