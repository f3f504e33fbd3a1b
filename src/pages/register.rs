//! Registration page; hands off to OTP verification on success.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::config::AppConfig;
use crate::state::auth::{AuthState, BrowserSession};
use crate::util::validate::RegistrationForm;

/// `/verify-otp` URL carrying `email` as a query parameter.
fn verify_otp_path(email: &str) -> String {
    format!("/verify-otp?email={}", urlencoding::encode(email))
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = StoredValue::new(BrowserSession::from_config(&expect_context::<AppConfig>()));
    let navigate = use_navigate();

    let form = RwSignal::new(RegistrationForm::default());
    let info = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let busy = move || auth.get().loading;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.get_untracked().loading {
            return;
        }
        let registration = match form.with(RegistrationForm::validate) {
            Ok(registration) => registration,
            Err(e) => {
                info.set(e.to_string());
                return;
            }
        };

        let session = session.get_value();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match session.register(&auth, &registration).await {
                Ok(_) => navigate(&verify_otp_path(&registration.email), NavigateOptions::default()),
                Err(e) => info.set(e.to_string()),
            }
        });
    };

    let password_type = move || if show_password.get() { "text" } else { "password" };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create Account"</h1>
                <p class="login-card__subtitle">"Register with your student email."</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Full name"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@university.edu"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Student ID"
                        prop:value=move || form.with(|f| f.student_id.clone())
                        on:input=move |ev| form.update(|f| f.student_id = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type=password_type
                        placeholder="Create a strong password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type=password_type
                        placeholder="Confirm your password"
                        prop:value=move || form.with(|f| f.confirm_password.clone())
                        on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                    />
                    <label class="login-toggle">
                        <input
                            type="checkbox"
                            prop:checked=move || show_password.get()
                            on:change=move |ev| show_password.set(event_target_checked(&ev))
                        />
                        "Show passwords"
                    </label>
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if busy() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already registered? " <A href="/login">"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
