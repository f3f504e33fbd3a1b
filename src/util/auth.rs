//! Route guard shared by every protected page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components must apply identical redirect behavior, so the decision
//! is one pure function over the session snapshot. It is recomputed on each
//! navigation and session change, never cached.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::AuthState;

/// Where signed-out visitors are sent.
pub const SIGN_IN_PATH: &str = "/login";
/// Where signed-in visitors without privilege are sent.
pub const LANDING_PATH: &str = "/";

/// Privilege a route demands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Access {
    /// Any signed-in user.
    #[default]
    SignedIn,
    /// Admin accounts only.
    Privileged,
}

/// Outcome of guarding one navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision<'a> {
    /// Session restore still reading storage; show a placeholder.
    Pending,
    /// Render the requested path.
    Render(&'a str),
    /// Replace the navigation with this path.
    Redirect(&'static str),
}

/// Decide what to show for `requested_path` under `access`.
pub fn decide<'a>(state: &AuthState, access: Access, requested_path: &'a str) -> RouteDecision<'a> {
    if state.is_restoring() {
        return RouteDecision::Pending;
    }
    if !state.is_authenticated() {
        return RouteDecision::Redirect(SIGN_IN_PATH);
    }
    if access == Access::Privileged && !state.is_privileged() {
        return RouteDecision::Redirect(LANDING_PATH);
    }
    RouteDecision::Render(requested_path)
}

/// Where a user lands right after signing in.
pub fn post_sign_in_path(state: &AuthState) -> &'static str {
    if state.is_privileged() { "/admin" } else { "/elections" }
}
