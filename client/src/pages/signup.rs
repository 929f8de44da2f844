//! Signup page: account registration.
//!
//! Validation (required fields, matching passwords, terms) runs inside the
//! controller before any request; its message is shown inline.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use session::guard::{LOGIN_PATH, RETURN_PARAM, return_target};
use session::{CredentialRequest, SignupForm};

use crate::components::brand::Brand;
use crate::components::form_notice::{Notice, NoticeBanner};
use crate::state::auth::AuthState;
use crate::util::auth;

/// Login link that keeps the pending return path.
pub(crate) fn login_href(from: Option<&str>) -> String {
    match from {
        Some(from) => format!("{LOGIN_PATH}?{RETURN_PARAM}={}", urlencoding::encode(from)),
        None => LOGIN_PATH.to_owned(),
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let query = use_query_map();
    let from = move || query.with(|q| q.get(RETURN_PARAM));

    let form = RwSignal::new(SignupForm::default());
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        notice.set(None);
        let request = CredentialRequest::Register(form.get());
        let target = return_target(from().as_deref());

        leptos::task::spawn_local(async move {
            match auth::controller().submit(request).await {
                Ok(session) => {
                    notice.set(Some(Notice::Success(welcome_message(&session.user.username))));
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
                <h1>"Create your account"</h1>
                <p class="auth-card__subtitle">"Start splitting expenses today"</p>
                <NoticeBanner notice=notice />
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-form__field">
                        "Username"
                        <input
                            class="auth-input"
                            type="text"
                            autocomplete="username"
                            prop:value=move || form.with(|f| f.username.clone())
                            on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-form__field">
                        "Email"
                        <input
                            class="auth-input"
                            type="email"
                            autocomplete="email"
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-form__field">
                        "Password"
                        <input
                            class="auth-input"
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-form__field">
                        "Confirm password"
                        <input
                            class="auth-input"
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || form.with(|f| f.confirm_password.clone())
                            on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-form__check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.agree_terms)
                            on:change=move |ev| form.update(|f| f.agree_terms = event_target_checked(&ev))
                        />
                        "I agree to the terms and conditions"
                    </label>
                    <button class="btn auth-form__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Sign up" }}
                    </button>
                </form>
                <p class="auth-card__switch">
                    "Already have an account? "
                    <a href=move || login_href(from().as_deref())>"Log in"</a>
                </p>
            </div>
        </div>
    }
}

pub(crate) fn welcome_message(username: &str) -> String {
    format!("Account created. Welcome to Splito, {username}!")
}
