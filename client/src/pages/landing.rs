//! Public landing page, served at `/` and `/authentication`.

use leptos::prelude::*;
use session::guard::{LOGIN_PATH, SIGNUP_PATH};

use crate::components::brand::Brand;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing-page">
            <header class="landing-page__header">
                <Brand />
                <nav class="landing-page__nav">
                    <a class="btn btn--ghost" href=LOGIN_PATH>"Log in"</a>
                    <a class="btn" href=SIGNUP_PATH>"Sign up"</a>
                </nav>
            </header>
            <main class="landing-page__hero">
                <h1>"Split bills " <span class="landing-page__accent">"the easy way"</span></h1>
                <p class="landing-page__lead">
                    "Track shared expenses with roommates, trips and friends. See who owes what at a glance."
                </p>
                <div class="landing-page__actions">
                    <a class="btn" href=SIGNUP_PATH>"Get started"</a>
                    <a class="btn btn--ghost" href=LOGIN_PATH>"I already have an account"</a>
                </div>
            </main>
        </div>
    }
}
