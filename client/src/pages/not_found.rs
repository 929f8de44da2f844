//! Fallback for unknown routes.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <p class="not-found-page__code">"404"</p>
            <h1>"Page Not Found"</h1>
            <p>"The page you are looking for does not exist or has been moved."</p>
            <a class="btn" href="/">"Go home"</a>
        </div>
    }
}
