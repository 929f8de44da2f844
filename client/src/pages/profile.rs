//! Profile page: edit the cached user record and upload an avatar.
//!
//! SYSTEM CONTEXT
//! ==============
//! Edits go through `SessionController::update_profile`, which re-persists
//! the `user` cookie on success. Picked images are checked for type and size
//! before being read, then cached in `localStorage` as a data URL.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use session::ProfileUpdate;

use crate::components::app_header::AppHeader;
use crate::components::form_notice::{Notice, NoticeBanner};
use crate::components::user_badge::UserBadge;
use crate::state::auth::AuthState;
use crate::util::auth::{self, RequireSession};

pub(crate) const PROFILE_SAVED_MESSAGE: &str = "Profile updated successfully";
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub(crate) const IMAGE_SAVED_MESSAGE: &str = "Profile image updated";

/// `"Member"` for an unset role, otherwise the role with a capital letter.
pub(crate) fn role_label(role: &str) -> String {
    let mut chars = role.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Member".to_owned(),
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <RequireSession>
            <ProfileContent />
        </RequireSession>
    }
}

#[component]
fn ProfileContent() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let draft = RwSignal::new(
        auth_state.with_untracked(|a| a.user().map(ProfileUpdate::from_user).unwrap_or_default()),
    );
    let image = RwSignal::new(auth::controller().profile_image());
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        notice.set(None);
        let update = draft.get();

        leptos::task::spawn_local(async move {
            match auth::controller().update_profile(&update).await {
                Ok(session) => {
                    draft.set(ProfileUpdate::from_user(&session.user));
                    auth_state.set(AuthState::resolved(Some(session)));
                    notice.set(Some(Notice::Success(PROFILE_SAVED_MESSAGE.to_owned())));
                }
                Err(err) => notice.set(Some(Notice::Error(err.user_message()))),
            }
            busy.set(false);
        });
    };

    let on_pick = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;

            let Some(file) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0))
            else {
                return;
            };
            leptos::task::spawn_local(async move {
                let cached = match crate::util::file_upload::read_profile_image(file).await {
                    Ok(picked) => auth::controller()
                        .cache_profile_image(&picked)
                        .map(|()| picked.data_url().to_owned())
                        .map_err(|e| e.user_message()),
                    Err(message) => Err(message),
                };
                match cached {
                    Ok(data_url) => {
                        image.set(Some(data_url));
                        notice.set(Some(Notice::Success(IMAGE_SAVED_MESSAGE.to_owned())));
                    }
                    Err(message) => notice.set(Some(Notice::Error(message))),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let field = move |label: &'static str, kind: &'static str, get: fn(&ProfileUpdate) -> String, set: fn(&mut ProfileUpdate, String)| {
        view! {
            <label class="profile-form__field">
                {label}
                <input
                    class="auth-input"
                    type=kind
                    prop:value=move || draft.with(get)
                    on:input=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
                />
            </label>
        }
    };

    view! {
        <div class="profile-page">
            <AppHeader />
            <main class="profile-page__main">
                {move || {
                    auth_state
                        .get()
                        .user()
                        .cloned()
                        .map(|user| {
                            let role = role_label(&user.role);
                            let email = user.email.clone();
                            let name = user.username.clone();
                            view! {
                                <section class="profile-card">
                                    <UserBadge user=user image=image.get() large=true />
                                    <h1 class="profile-card__name">{name}</h1>
                                    <p class="profile-card__email">{email}</p>
                                    <span class="profile-card__role">{role}</span>
                                    <label class="btn btn--ghost profile-card__upload">
                                        "Change photo"
                                        <input type="file" accept="image/*" hidden=true on:change=on_pick />
                                    </label>
                                </section>
                            }
                        })
                }}
                <section class="profile-page__form">
                    <h2>"Edit Profile"</h2>
                    <NoticeBanner notice=notice />
                    <form class="profile-form" on:submit=on_save>
                        {field("Username", "text", |d| d.username.clone(), |d, v| d.username = v)}
                        {field("Email", "email", |d| d.email.clone(), |d, v| d.email = v)}
                        {field("Phone", "tel", |d| d.phone.clone(), |d, v| d.phone = v)}
                        {field("Location", "text", |d| d.location.clone(), |d, v| d.location = v)}
                        <label class="profile-form__field">
                            "Bio"
                            <textarea
                                class="auth-input profile-form__bio"
                                rows="4"
                                prop:value=move || draft.with(|d| d.bio.clone())
                                on:input=move |ev| draft.update(|d| d.bio = event_target_value(&ev))
                            ></textarea>
                        </label>
                        <button class="btn profile-form__submit" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Saving..." } else { "Save changes" }}
                        </button>
                    </form>
                </section>
            </main>
        </div>
    }
}
