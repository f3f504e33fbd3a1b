//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::{nav_bar::NavBar, route_guard::RouteGuard};
use crate::config::AppConfig;
use crate::pages::{
    admin::AdminPage, elections::ElectionsPage, home::HomePage, login::LoginPage, nominate::NominatePage,
    register::RegisterPage, results::ResultsPage, verify_otp::VerifyOtpPage, voting_booth::VotingBoothPage,
};
use crate::state::auth::{AuthState, BrowserSession};
use crate::util::auth::{Access, LANDING_PATH};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the configuration and the session signal, restores any stored
/// session once on the client, and sets up routing. Every protected route
/// sits behind a [`RouteGuard`].
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::default();
    // Starts in the restoring state so guards wait instead of redirecting.
    let auth = RwSignal::new(AuthState::default());
    let session = StoredValue::new(BrowserSession::from_config(&config));

    provide_context(config);
    provide_context(auth);

    Effect::new(move || session.with_value(|s| s.restore(&auth)));

    view! {
        <Stylesheet id="leptos" href="/pkg/unionvote.css"/>
        <Title text="Student Union Elections"/>

        <Router>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| view! { <Redirect path=LANDING_PATH/> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("verify-otp") view=VerifyOtpPage/>
                    <Route
                        path=StaticSegment("elections")
                        view=|| view! { <RouteGuard><ElectionsPage/></RouteGuard> }
                    />
                    <Route
                        path=(StaticSegment("vote"), ParamSegment("id"))
                        view=|| view! { <RouteGuard><VotingBoothPage/></RouteGuard> }
                    />
                    <Route
                        path=StaticSegment("nominate")
                        view=|| view! { <RouteGuard><NominatePage/></RouteGuard> }
                    />
                    <Route
                        path=(StaticSegment("results"), ParamSegment("id"))
                        view=|| view! { <RouteGuard><ResultsPage/></RouteGuard> }
                    />
                    <Route
                        path=StaticSegment("admin")
                        view=|| view! { <RouteGuard access=Access::Privileged><AdminPage/></RouteGuard> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
