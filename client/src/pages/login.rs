//! Login page: email + password against the AuthAPI.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached directly or via a guard redirect carrying `?from=<path>`. On
//! success the session is already persisted when `submit` resolves, so a
//! full page load to the return target passes the server guard.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use session::guard::{RETURN_PARAM, SIGNUP_PATH, return_target};
use session::{CredentialRequest, LoginForm};

use crate::components::brand::Brand;
use crate::components::form_notice::{Notice, NoticeBanner};
use crate::state::auth::AuthState;
use crate::util::auth;

pub(crate) fn login_request(email: &str, password: &str) -> CredentialRequest {
    CredentialRequest::Login(LoginForm { email: email.to_owned(), password: password.to_owned() })
}

/// Signup link that keeps the pending return path.
pub(crate) fn signup_href(from: Option<&str>) -> String {
    match from {
        Some(from) => format!("{SIGNUP_PATH}?{RETURN_PARAM}={}", urlencoding::encode(from)),
        None => SIGNUP_PATH.to_owned(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let query = use_query_map();
    let from = move || query.with(|q| q.get(RETURN_PARAM));

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        notice.set(None);
        let request = login_request(&email.get(), &password.get());
        let target = return_target(from().as_deref());

        leptos::task::spawn_local(async move {
            match auth::controller().submit(request).await {
                Ok(session) => {
                    notice.set(Some(Notice::Success(format!("Welcome back, {}!", session.user.username))));
                    auth_state.set(AuthState::resolved(Some(session)));
                    auth::hard_navigate(&target);
                }
                Err(err) => {
                    notice.set(Some(Notice::Error(err.user_message())));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <Brand />
                <h1>"Welcome back"</h1>
                <p class="auth-card__subtitle">"Log in to your account"</p>
                <NoticeBanner notice=notice />
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-form__field">
                        "Email"
                        <input
                            class="auth-input"
                            type="email"
                            autocomplete="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-form__field">
                        "Password"
                        <input
                            class="auth-input"
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="btn auth-form__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Logging in..." } else { "Log in" }}
                    </button>
                </form>
                <p class="auth-card__switch">
                    "Don't have an account? "
                    <a href=move || signup_href(from().as_deref())>"Sign up"</a>
                </p>
                <div class="auth-card__hint">
                    <p class="auth-card__hint-title">"Test Credentials"</p>
                    <p>"test@gmail.com / test123"</p>
                </div>
            </div>
        </div>
    }
}
