//! Public landing page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let signed_in = move || auth.get().is_authenticated();

    view! {
        <section class="home-hero">
            <h1>"Your Voice, Your Union"</h1>
            <p class="home-hero__subtitle">
                "Register with your student email, verify your account, and cast your ballot \
                 in student union elections."
            </p>
            <div class="home-hero__actions">
                <Show
                    when=signed_in
                    fallback=|| {
                        view! {
                            <A href="/register">"Get Started"</A>
                            <A href="/login">"Login"</A>
                        }
                    }
                >
                    <A href="/elections">"View Elections"</A>
                    <A href="/nominate">"Stand as a Candidate"</A>
                </Show>
            </div>
        </section>
        <section class="home-steps">
            <div class="home-steps__item">
                <h3>"1. Register"</h3>
                <p>"Sign up with your student email and student ID."</p>
            </div>
            <div class="home-steps__item">
                <h3>"2. Verify"</h3>
                <p>"Confirm your account with the one-time code we email you."</p>
            </div>
            <div class="home-steps__item">
                <h3>"3. Vote"</h3>
                <p>"Choose a candidate for every position and submit your ballot."</p>
            </div>
        </section>
    }
}
