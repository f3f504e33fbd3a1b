//! Top navigation with session-aware links and sign-out.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::config::AppConfig;
use crate::state::auth::{AuthState, BrowserSession};
use crate::util::auth::LANDING_PATH;

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = StoredValue::new(BrowserSession::from_config(&expect_context::<AppConfig>()));
    let navigate = use_navigate();

    let on_sign_out = move |_| {
        session.with_value(|s| s.clear(&auth));
        navigate(LANDING_PATH, NavigateOptions::default());
    };

    let signed_in = move || auth.get().is_authenticated();
    let display_name = move || {
        auth.get()
            .user
            .map(|user| user.display_name)
            .unwrap_or_default()
    };

    view! {
        <nav class="navbar">
            <span class="navbar__brand">
                <A href="/">"Student Union Voting"</A>
            </span>
            <div class="navbar__links" class:navbar__links--hidden=move || !signed_in()>
                <A href="/elections">"Elections"</A>
                <A href="/nominate">"Nominate"</A>
                <Show when=move || auth.get().is_privileged()>
                    <A href="/admin">"Admin"</A>
                </Show>
                <span class="navbar__user">{display_name}</span>
                <button class="navbar__button" on:click=on_sign_out>
                    "Sign Out"
                </button>
            </div>
            <div class="navbar__links" class:navbar__links--hidden=signed_in>
                <A href="/login">"Login"</A>
                <A href="/register">"Register"</A>
            </div>
        </nav>
    }
}
