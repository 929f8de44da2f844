//! Avatar badge for the signed-in user.
//!
//! Shows the cached profile image when one exists, otherwise the username
//! initial.

use leptos::prelude::*;
use session::User;

#[component]
pub fn UserBadge(user: User, #[prop(default = None)] image: Option<String>, #[prop(optional)] large: bool) -> impl IntoView {
    let initial = user.initial();
    let alt = user.username.clone();

    view! {
        <span class="user-badge" class:user-badge--large=large>
            {match image {
                Some(src) => view! { <img class="user-badge__image" src=src alt=alt /> }.into_any(),
                None => view! { <span class="user-badge__initial">{initial}</span> }.into_any(),
            }}
        </span>
    }
}
