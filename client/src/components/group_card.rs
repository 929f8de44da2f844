//! Selectable group card.

use leptos::prelude::*;

use crate::state::dashboard::{Group, format_money};

/// A group tile; clicking it makes the group active.
#[component]
pub fn GroupCard(group: Group, #[prop(into)] active: Signal<bool>, on_select: Callback<&'static str>) -> impl IntoView {
    let name = group.name;
    let initial = name.chars().next().unwrap_or('?');

    view! {
        <button
            class="group-card"
            class:group-card--active=move || active.get()
            on:click=move |_| on_select.run(name)
        >
            <span class=format!("group-card__badge group-card__badge--{}", group.accent)>{initial}</span>
            <span class="group-card__body">
                <span class="group-card__name">{name}</span>
                <span class="group-card__members">{format!("{} members", group.members)}</span>
            </span>
            <span class="group-card__total">{format_money(group.total_cents)}</span>
        </button>
    }
}
