//! Top bar for authenticated pages.

use leptos::prelude::*;

use crate::components::brand::Brand;
use crate::components::user_badge::UserBadge;
use crate::state::auth::AuthState;
use crate::util::auth;

/// Brand, navigation, identity and logout.
#[component]
pub fn AppHeader() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();

    view! {
        <header class="app-header">
            <Brand href="/dashboard" />
            <nav class="app-header__nav">
                <a href="/dashboard">"Dashboard"</a>
                <a href="/profile">"Profile"</a>
            </nav>
            <span class="app-header__spacer"></span>
            {move || {
                auth_state
                    .get()
                    .user()
                    .cloned()
                    .map(|user| {
                        let name = user.username.clone();
                        let image = auth::controller().profile_image();
                        view! {
                            <span class="app-header__self">
                                <UserBadge user=user image=image />
                                <span class="app-header__name">{name}</span>
                            </span>
                        }
                    })
            }}
            <button class="btn app-header__logout" on:click=move |_| auth::logout(auth_state) title="Logout">
                "Logout"
            </button>
        </header>
    }
}
