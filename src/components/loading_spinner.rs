//! Placeholder shown while a page waits on the demo backend.

use leptos::prelude::*;

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    let label = label.unwrap_or_else(|| "Loading...".to_owned());
    view! {
        <div class="loading-spinner" role="status">
            <span class="loading-spinner__ring" aria-hidden="true"></span>
            <span class="loading-spinner__label">{label}</span>
        </div>
    }
}
