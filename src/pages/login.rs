//! Login page for email + password sign-in.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::config::{AppConfig, DEMO_ADMIN_EMAIL, DEMO_STUDENT_EMAIL};
use crate::state::auth::{AuthState, BrowserSession};
use crate::util::auth::post_sign_in_path;
use crate::util::validate::validate_login;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = StoredValue::new(BrowserSession::from_config(&expect_context::<AppConfig>()));
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = move || auth.get().loading;

    let sign_in = move |email_value: String, password_value: String| {
        info.set("Signing in...".to_owned());
        let session = session.get_value();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match session.establish(&auth, &email_value, &password_value).await {
                Ok(()) => {
                    info.set(String::new());
                    navigate(post_sign_in_path(&auth.get_untracked()), NavigateOptions::default());
                }
                Err(e) => info.set(e.to_string()),
            }
        });
    };

    let on_submit = {
        let sign_in = sign_in.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if auth.get_untracked().loading {
                return;
            }
            match validate_login(&email.get(), &password.get()) {
                Ok((email_value, password_value)) => sign_in(email_value, password_value),
                Err(e) => info.set(e.to_string()),
            }
        }
    };

    // Quick sign-in for the two demo accounts; any password is accepted.
    let demo_sign_in = move |demo_email: &'static str| {
        let sign_in = sign_in.clone();
        move |_: leptos::ev::MouseEvent| {
            if auth.get_untracked().loading {
                return;
            }
            email.set(demo_email.to_owned());
            sign_in(demo_email.to_owned(), "password".to_owned());
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign In"</h1>
                <p class="login-card__subtitle">"Use your student email to access elections."</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@university.edu"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if busy() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-card__demo">
                    <p class="login-card__hint">"Demo accounts"</p>
                    <button class="login-link" type="button" disabled=busy on:click={demo_sign_in(DEMO_STUDENT_EMAIL)}>
                        "Sign in as Student"
                    </button>
                    <button class="login-link" type="button" disabled=busy on:click={demo_sign_in(DEMO_ADMIN_EMAIL)}>
                        "Sign in as Admin"
                    </button>
                </div>
                <p class="login-card__footer">
                    "No account yet? " <A href="/register">"Register"</A>
                </p>
            </div>
        </div>
    }
}
