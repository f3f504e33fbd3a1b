//! Wrapper that renders its children only when the route guard allows it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route in `App` is wrapped in `RouteGuard`; the decision
//! itself lives in `util::auth::decide` so it stays testable without a
//! reactive runtime.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::components::loading_spinner::LoadingSpinner;
use crate::state::auth::AuthState;
use crate::util::auth::{Access, RouteDecision, decide};

/// Owned form of [`RouteDecision`] so it can be memoized; children are only
/// rebuilt when the outcome changes, not on every session update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gate {
    Wait,
    Show,
    Leave(&'static str),
}

#[component]
pub fn RouteGuard(#[prop(optional)] access: Access, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();

    let gate = Memo::new(move |_| {
        let state = auth.get();
        let path = location.pathname.get();
        match decide(&state, access, &path) {
            RouteDecision::Pending => Gate::Wait,
            RouteDecision::Render(_) => Gate::Show,
            RouteDecision::Redirect(target) => Gate::Leave(target),
        }
    });

    move || match gate.get() {
        Gate::Wait => view! { <LoadingSpinner/> }.into_any(),
        Gate::Show => children().into_any(),
        Gate::Leave(target) => view! { <Redirect path=target/> }.into_any(),
    }
}
