//! Pre-render session guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs before any page is server-rendered. The request's `token` and `user`
//! cookies are read through [`JarStore`], the same `SessionStore` rules the
//! browser uses, so the server and client never disagree about what counts
//! as a session.
//!
//! DESIGN
//! ======
//! - Corrupt cookies are expired on the response and the request proceeds
//!   as anonymous.
//! - Anonymous requests for protected pages are redirected to the login page
//!   with `?from=<path>`.
//! - With token validation enabled, a rejected token is handled like a
//!   corrupt session. A failed validation call fails closed.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::cell::RefCell;

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use session::cookie::{self, CookieAttributes};
use session::guard::{self, GuardDecision, RouteAccess};
use session::store::{self, PROFILE_IMAGE_KEY, SessionStore};
use session::{AuthApi, StoreError};

use crate::state::AppState;

// =============================================================================
// COOKIE JAR STORE
// =============================================================================

/// [`SessionStore`] over one request's cookie jar.
///
/// The jar decodes request cookies and encodes the `Set-Cookie` headers it
/// emits, so values pass through untouched. Writes and removals accumulate
/// in the jar until it is returned with the response.
/// `profileImage` is browser-local and never becomes a cookie.
pub struct JarStore {
    jar: RefCell<CookieJar>,
    attrs: CookieAttributes,
}

impl JarStore {
    pub fn new(jar: CookieJar, attrs: CookieAttributes) -> Self {
        Self { jar: RefCell::new(jar), attrs }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar.into_inner()
    }

    fn update(&self, f: impl FnOnce(CookieJar) -> CookieJar) {
        let jar = self.jar.take();
        *self.jar.borrow_mut() = f(jar);
    }
}

impl SessionStore for JarStore {
    fn get(&self, key: &str) -> Option<String> {
        let jar = self.jar.borrow();
        let value = jar.get(key)?.value();
        if value.is_empty() { None } else { Some(value.to_owned()) }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if key == PROFILE_IMAGE_KEY {
            return Ok(());
        }
        let cookie = cookie::session_cookie(key, value, self.attrs);
        self.update(|jar| jar.add(cookie));
        Ok(())
    }

    fn remove(&self, key: &str) {
        if key == PROFILE_IMAGE_KEY {
            return;
        }
        self.update(|jar| jar.remove(Cookie::build(key.to_owned()).path("/")));
    }
}

// =============================================================================
// DECISION
// =============================================================================

/// Evaluate the guard for `path` against the cookies in `jar`.
///
/// Returns the jar (with any cookie removals) alongside the decision.
pub(crate) async fn decide<A: AuthApi>(
    path: &str,
    jar: CookieJar,
    attrs: CookieAttributes,
    validator: Option<A>,
) -> (CookieJar, GuardDecision) {
    let store = JarStore::new(jar, attrs);
    let session = store::load_session(&store);
    let decision = guard::guard(path, session.as_ref());

    let decision = match (decision, session, validator) {
        (GuardDecision::Allow, Some(session), Some(api)) if guard::classify(path) == RouteAccess::Protected => {
            match api.validate(&session.token).await {
                Ok(true) => GuardDecision::Allow,
                Ok(false) => {
                    tracing::info!(user_id = %session.user.id, path, "stored token rejected; clearing session");
                    store::clear_session(&store);
                    GuardDecision::Redirect(guard::login_redirect(path))
                }
                Err(err) => {
                    tracing::warn!(error = %err, path, "token validation failed; clearing session");
                    store::clear_session(&store);
                    GuardDecision::Redirect(guard::login_redirect(path))
                }
            }
        }
        (decision, _, _) => decision,
    };

    (store.into_jar(), decision)
}

/// Only document requests are guarded; other methods pass through.
fn is_guarded(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}

/// Axum middleware applying [`decide`] before page rendering.
pub async fn session_guard(State(state): State<AppState>, jar: CookieJar, request: Request, next: Next) -> Response {
    if !is_guarded(request.method()) {
        return next.run(request).await;
    }
    let path = request.uri().path().to_owned();
    let attrs = CookieAttributes { secure: state.config.cookie_secure, ..CookieAttributes::default() };

    let (jar, decision) = decide(&path, jar, attrs, state.validator()).await;
    match decision {
        GuardDecision::Allow => (jar, next.run(request).await).into_response(),
        GuardDecision::Redirect(to) => {
            tracing::debug!(%path, %to, "guard redirect");
            (jar, Redirect::temporary(&to)).into_response()
        }
    }
}
