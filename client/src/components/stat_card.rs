//! Summary figure card for the dashboard header row.

use leptos::prelude::*;

#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: String,
    #[prop(into)] caption: String,
    #[prop(into, default = "neutral".to_owned())] tone: String,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <p class="stat-card__label">{label}</p>
            <p class="stat-card__value">{value}</p>
            <p class=format!("stat-card__caption stat-card__caption--{tone}")>{caption}</p>
        </div>
    }
}
