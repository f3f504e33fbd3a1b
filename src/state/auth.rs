//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns one `RwSignal<AuthState>` and provides it through context.
//! Route guards and user-aware components read it; every mutation goes
//! through [`SessionStore`] (restore, establish, verify, clear, plus the
//! registration request) so the identity/flag invariants live in one place.
//!
//! DESIGN
//! ======
//! The store is generic over where the session is persisted
//! ([`KeyValueStore`]), where the round trip goes ([`AuthBackend`]) and where
//! the reactive state lives ([`SessionCell`]). The browser wires
//! `LocalStorage + DemoAuthBackend + RwSignal`; tests wire in-memory parts.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;


use leptos::prelude::{GetUntracked, RwSignal, Update};

use crate::config::AppConfig;
use crate::net::api::{AuthBackend, DemoAuthBackend, SessionGrant};
use crate::net::types::User;
use crate::util::storage::{self, KeyValueStore, LocalStorage};
use crate::util::validate::Registration;

/// Storage key holding the opaque session token.
pub const TOKEN_KEY: &str = "authToken";
/// Storage key holding the JSON identity record.
pub const USER_KEY: &str = "userData";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Session expired. Please login again.")]
    SessionExpired,
    #[error("{0}")]
    AuthenticationFailed(String),
    #[error("Invalid OTP code")]
    InvalidCode,
    #[error("{0}")]
    Backend(String),
}

/// Authentication state tracking the current user and loading status.
///
/// `user` is the single source of truth for "signed in", so an
/// authenticated state without an identity cannot be represented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Application-start shape: signed out, restore pending.
impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            error: None,
        }
    }
}

impl AuthState {
    /// Settled signed-out state.
    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
            error: None,
        }
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_privileged(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_privileged)
    }

    /// Restore has not settled yet and nobody is signed in.
    pub fn is_restoring(&self) -> bool {
        self.loading && self.user.is_none()
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, error: &SessionError) {
        self.loading = false;
        self.error = Some(error.to_string());
    }
}

/// Somewhere an [`AuthState`] lives that the store can read and update.
pub trait SessionCell {
    fn snapshot(&self) -> AuthState;
    fn update_state(&self, f: impl FnOnce(&mut AuthState));
}

impl SessionCell for RwSignal<AuthState> {
    fn snapshot(&self) -> AuthState {
        self.get_untracked()
    }

    fn update_state(&self, f: impl FnOnce(&mut AuthState)) {
        self.update(f);
    }
}

/// Session operations over a storage and a backend.
#[derive(Clone, Debug)]
pub struct SessionStore<S, B> {
    storage: S,
    backend: B,
}

/// The wiring used by the browser app.
pub type BrowserSession = SessionStore<LocalStorage, DemoAuthBackend>;

impl BrowserSession {
    pub fn from_config(config: &AppConfig) -> Self {
        SessionStore::new(LocalStorage, DemoAuthBackend::new(config.clone()))
    }
}

impl<S: KeyValueStore, B: AuthBackend> SessionStore<S, B> {
    pub fn new(storage: S, backend: B) -> Self {
        Self { storage, backend }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolve the start-of-application state from persisted storage.
    ///
    /// Token and identity both present and parseable restores the session.
    /// Empty values count as absent.
    /// An unparseable identity wipes both keys and reports
    /// [`SessionError::SessionExpired`]. Anything else settles signed out.
    pub fn restore(&self, cell: &impl SessionCell) {
        let token = self.storage.get_item(TOKEN_KEY).filter(|token| !token.is_empty());
        let user = storage::load_json::<User>(&self.storage, USER_KEY);
        let next = match (token, user) {
            (Some(_), Some(Ok(user))) => {
                leptos::logging::log!("session restored for {}", user.email);
                AuthState::authenticated(user)
            }
            (Some(_), Some(Err(e))) => {
                leptos::logging::warn!("discarding corrupt {USER_KEY}: {e}");
                self.wipe();
                AuthState {
                    error: Some(SessionError::SessionExpired.to_string()),
                    ..AuthState::signed_out()
                }
            }
            _ => AuthState::signed_out(),
        };
        cell.update_state(|state| *state = next);
    }

    /// Sign in with an identifier and secret.
    ///
    /// Callers check both are non-empty and keep the trigger disabled while
    /// `loading` is set.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`SessionError`]; the state keeps its previous
    /// identity and carries the message in `error`.
    pub async fn establish(
        &self,
        cell: &impl SessionCell,
        email: &str,
        secret: &str,
    ) -> Result<(), SessionError> {
        cell.update_state(AuthState::begin);
        let outcome = self.backend.sign_in(email, secret).await;
        self.settle(cell, outcome)
    }

    /// Confirm a one-time code and sign the new account in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidCode`] when the code is rejected.
    pub async fn verify(&self, cell: &impl SessionCell, email: &str, code: &str) -> Result<(), SessionError> {
        cell.update_state(AuthState::begin);
        let outcome = self.backend.verify_code(email, code).await;
        self.settle(cell, outcome)
    }

    /// Submit a registration. Never signs in; returns the confirmation text.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`SessionError`], also recorded in `error`.
    pub async fn register(
        &self,
        cell: &impl SessionCell,
        registration: &Registration,
    ) -> Result<String, SessionError> {
        cell.update_state(AuthState::begin);
        match self.backend.register(registration).await {
            Ok(message) => {
                cell.update_state(|state| state.loading = false);
                Ok(message)
            }
            Err(e) => {
                leptos::logging::warn!("registration failed: {e}");
                cell.update_state(|state| state.fail(&e));
                Err(e)
            }
        }
    }

    /// Sign out: drop persisted credentials and reset synchronously.
    pub fn clear(&self, cell: &impl SessionCell) {
        self.wipe();
        cell.update_state(|state| *state = AuthState::signed_out());
    }

    fn settle(
        &self,
        cell: &impl SessionCell,
        outcome: Result<SessionGrant, SessionError>,
    ) -> Result<(), SessionError> {
        match outcome {
            Ok(grant) => {
                self.storage.set_item(TOKEN_KEY, &grant.token);
                storage::save_json(&self.storage, USER_KEY, &grant.user);
                leptos::logging::log!(
                    "signed in {} (privileged={})",
                    grant.user.email,
                    grant.user.is_privileged
                );
                cell.update_state(|state| *state = AuthState::authenticated(grant.user));
                Ok(())
            }
            Err(e) => {
                leptos::logging::warn!("sign-in rejected: {e}");
                cell.update_state(|state| state.fail(&e));
                Err(e)
            }
        }
    }

    fn wipe(&self) {
        self.storage.remove_item(TOKEN_KEY);
        self.storage.remove_item(USER_KEY);
    }
}
