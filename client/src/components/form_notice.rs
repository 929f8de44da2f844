//! Inline success / error banner for forms.

use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Success(_) => "Success!",
            Self::Error(_) => "Error",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Renders the current notice, if any.
#[component]
pub fn NoticeBanner(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            view! {
                <div class="notice" class:notice--error=n.is_error() role="status">
                    <p class="notice__title">{n.title()}</p>
                    <p class="notice__text">{n.text().to_owned()}</p>
                </div>
            }
        })
    }
}
