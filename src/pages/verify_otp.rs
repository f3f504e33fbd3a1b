//! One-time-code verification completing registration.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached from the register page with `?email=`. A successful verify signs
//! the new account in and continues to `/elections`. Resending is rate
//! limited client-side by a countdown.

#[cfg(test)]
#[path = "verify_otp_test.rs"]
mod verify_otp_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::config::AppConfig;
use crate::net::api::AuthBackend;
use crate::state::auth::{AuthState, BrowserSession};
use crate::util::validate::{OTP_LEN, OtpEntry};

#[component]
pub fn VerifyOtpPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<AppConfig>();
    let session = StoredValue::new(BrowserSession::from_config(&config));
    let navigate = use_navigate();
    let query = use_query_map();

    let email = Memo::new(move |_| {
        query
            .read()
            .get("email")
            .map(|e| e.trim().to_owned())
            .unwrap_or_default()
    });

    let navigate_register = navigate.clone();
    Effect::new(move || {
        if email.get().is_empty() {
            navigate_register("/register", NavigateOptions::default());
        }
    });

    let entry = RwSignal::new(OtpEntry::default());
    let info = RwSignal::new(String::new());
    let resending = RwSignal::new(false);
    let cooldown = RwSignal::new(config.otp_resend_cooldown_secs);
    let cooldown_secs = config.otp_resend_cooldown_secs;
    let demo_code = StoredValue::new(config.otp_code.clone());
    let busy = move || auth.get().loading || resending.get();

    start_countdown(cooldown);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.get_untracked().loading {
            return;
        }
        let code = match entry.with(OtpEntry::code) {
            Ok(code) => code,
            Err(e) => {
                info.set(e.to_string());
                return;
            }
        };
        let email_value = email.get_untracked();

        let session = session.get_value();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match session.verify(&auth, &email_value, &code).await {
                Ok(()) => navigate("/elections", NavigateOptions::default()),
                Err(e) => info.set(e.to_string()),
            }
        });
    };

    let on_resend = move |_| {
        if cooldown.get_untracked() > 0 || resending.get_untracked() {
            return;
        }
        resending.set(true);
        let session = session.get_value();
        let email_value = email.get_untracked();
        leptos::task::spawn_local(async move {
            match session.backend().resend_code(&email_value).await {
                Ok(message) => {
                    info.try_set(message);
                    entry.try_update(OtpEntry::clear);
                    cooldown.try_set(cooldown_secs);
                    start_countdown(cooldown);
                }
                Err(e) => {
                    info.try_set(e.to_string());
                }
            }
            resending.try_set(false);
        });
    };

    let inputs: [NodeRef<leptos::html::Input>; OTP_LEN] = std::array::from_fn(|_| NodeRef::new());
    let boxes = (0..OTP_LEN)
        .map(|index| {
            view! {
                <input
                    class="otp-input"
                    type="text"
                    inputmode="numeric"
                    maxlength="1"
                    node_ref=inputs[index]
                    prop:value=move || entry.with(|e| e.digit(index).map(String::from).unwrap_or_default())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        if let Some(next) = entry.try_update(|e| e.input(index, &value)).flatten() {
                            focus(inputs[next]);
                        }
                    }
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() != "Backspace" {
                            return;
                        }
                        if let Some(prev) = entry.with_untracked(|e| e.backspace_target(index)) {
                            focus(inputs[prev]);
                        }
                    }
                />
            }
        })
        .collect_view();

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Verify Your Email"</h1>
                <p class="login-card__subtitle">
                    "Enter the 6-digit code sent to " <strong>{move || email.get()}</strong>
                </p>
                <form class="login-form" on:submit=on_submit>
                    <div class="otp-row">{boxes}</div>
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if auth.get().loading { "Verifying..." } else { "Verify" }}
                    </button>
                </form>
                <button
                    class="login-link"
                    type="button"
                    disabled=move || { busy() || cooldown.get() > 0 }
                    on:click=on_resend
                >
                    {move || match cooldown.get() {
                        0 => "Resend code".to_owned(),
                        secs => format!("Resend code in {secs}s"),
                    }}
                </button>
                <button
                    class="login-link"
                    type="button"
                    on:click=move |_| demo_code.with_value(|code| entry.update(|e| e.fill(code)))
                >
                    "Demo: fill code"
                </button>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}

fn focus(node: NodeRef<leptos::html::Input>) {
    if let Some(input) = node.get_untracked() {
        let _ = input.focus();
    }
}

/// Take one second off `remaining`. Returns `false` once the countdown is
/// over or the page that owns the signal has been torn down.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn tick(remaining: RwSignal<u32>) -> bool {
    remaining
        .try_update(|secs| {
            *secs = secs.saturating_sub(1);
            *secs > 0
        })
        .unwrap_or(false)
}

/// Tick `remaining` down to zero once per second in the browser.
///
/// The loop outlives the page when verification navigates away mid
/// countdown, so it only touches the signal through `try_*` accessors.
fn start_countdown(remaining: RwSignal<u32>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if !remaining.try_get_untracked().is_some_and(|secs| secs > 0) {
            return;
        }
        loop {
            gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
            if !tick(remaining) {
                break;
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = remaining;
}
