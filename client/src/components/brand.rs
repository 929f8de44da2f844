//! Splito wordmark.

use leptos::prelude::*;

/// Logo mark plus name, linking home.
#[component]
pub fn Brand(#[prop(into, default = "/".to_owned())] href: String) -> impl IntoView {
    view! {
        <a class="brand" href=href>
            <span class="brand__mark" aria-hidden="true">"$"</span>
            <span class="brand__name">"Splito"</span>
        </a>
    }
}
