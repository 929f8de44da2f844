//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior.
//! Every page reaches the persisted session through [`controller`], so login,
//! logout and the guard all read and write the same cookies.
//!
//! DESIGN
//! ======
//! Controllers are cheap (a unit store and a URL) and are built per action.
//! Double submission is blocked at the page by a `busy` signal that is set
//! before the controller is created.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use session::guard::{self, GuardDecision, LOGIN_PATH};
use session::SessionController;

use crate::net::api::BrowserAuthApi;
use crate::state::auth::AuthState;
use crate::util::browser_store::BrowserStore;

pub type AppController = SessionController<BrowserStore, BrowserAuthApi>;

pub fn controller() -> AppController {
    SessionController::new(BrowserStore::new(), BrowserAuthApi::default())
}

/// Where an unauthenticated visitor of `path` should be sent, if anywhere.
///
/// Nothing happens while the first storage read is pending.
pub fn redirect_for(path: &str, state: &AuthState) -> Option<String> {
    if state.loading {
        return None;
    }
    match guard::guard(path, state.session.as_ref()) {
        GuardDecision::Allow => None,
        GuardDecision::Redirect(to) => Some(to),
    }
}

/// Redirect to the login page whenever auth has loaded and no session is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, path: Memo<String>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(target) = redirect_for(&path.get(), &auth.get()) {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Full page load, so the server guard re-evaluates with fresh cookies.
pub fn hard_navigate(path: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
    }
}

/// Clear the session, mirror it into `auth`, and return to the login page.
pub fn logout(auth: RwSignal<AuthState>) {
    controller().clear();
    auth.set(AuthState::resolved(None));
    hard_navigate(LOGIN_PATH);
}

/// Renders `children` only for an authenticated session.
///
/// SSR and the first hydrate pass render the loading placeholder; the server
/// guard has already redirected anonymous requests before that.
#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    install_unauth_redirect(auth, location.pathname, use_navigate());

    view! {
        <Show
            when=move || auth.get().is_authenticated()
            fallback=move || {
                view! {
                    <div class="page-placeholder">
                        <p>{move || if auth.get().loading { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
