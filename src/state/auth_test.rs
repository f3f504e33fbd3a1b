use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::config::{DEMO_ADMIN_EMAIL, DEMO_STUDENT_EMAIL};
use crate::util::auth::post_sign_in_path;
use crate::util::storage::MemoryStorage;
use crate::util::validate::RegistrationForm;

// =============================================================
// Helpers
// =============================================================

type TestSession<'a> = SessionStore<&'a MemoryStorage, DemoAuthBackend>;

fn make_session(storage: &MemoryStorage) -> TestSession<'_> {
    SessionStore::new(storage, DemoAuthBackend::new(AppConfig::instant()))
}

fn make_user(privileged: bool) -> User {
    User {
        id: "u-1".to_owned(),
        email: "student@example.com".to_owned(),
        display_name: "Test User".to_owned(),
        is_privileged: privileged,
    }
}

impl SessionCell for RefCell<AuthState> {
    fn snapshot(&self) -> AuthState {
        self.borrow().clone()
    }

    fn update_state(&self, f: impl FnOnce(&mut AuthState)) {
        f(&mut self.borrow_mut());
    }
}

fn settled_cell() -> RefCell<AuthState> {
    RefCell::new(AuthState::signed_out())
}

/// Backend that rejects everything, to exercise failure paths.
struct RejectingBackend;

impl AuthBackend for RejectingBackend {
    async fn sign_in(&self, _email: &str, _secret: &str) -> Result<SessionGrant, SessionError> {
        Err(SessionError::AuthenticationFailed("Login failed. Please try again.".to_owned()))
    }

    async fn verify_code(&self, _email: &str, _code: &str) -> Result<SessionGrant, SessionError> {
        Err(SessionError::InvalidCode)
    }

    async fn register(&self, _registration: &Registration) -> Result<String, SessionError> {
        Err(SessionError::Backend("Registration failed. Please try again.".to_owned()))
    }

    async fn resend_code(&self, _email: &str) -> Result<String, SessionError> {
        Err(SessionError::Backend("Failed to resend OTP. Please try again.".to_owned()))
    }
}

/// Cell that records the state seen at every update.
struct RecordingCell {
    state: RefCell<AuthState>,
    history: RefCell<Vec<AuthState>>,
}

impl RecordingCell {
    fn new() -> Self {
        Self {
            state: RefCell::new(AuthState::signed_out()),
            history: RefCell::new(Vec::new()),
        }
    }
}

impl SessionCell for RecordingCell {
    fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    fn update_state(&self, f: impl FnOnce(&mut AuthState)) {
        f(&mut self.state.borrow_mut());
        self.history.borrow_mut().push(self.state.borrow().clone());
    }
}

// =============================================================
// AuthState shape
// =============================================================

#[test]
fn auth_state_default_is_restoring() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(state.loading);
    assert!(state.error.is_none());
    assert!(!state.is_authenticated());
    assert!(state.is_restoring());
}

#[test]
fn authenticated_state_carries_user() {
    let state = AuthState::authenticated(make_user(true));
    assert!(state.is_authenticated());
    assert!(state.is_privileged());
    assert!(!state.loading);
    assert!(!state.is_restoring());
}

#[test]
fn signed_out_state_is_not_privileged() {
    let state = AuthState::signed_out();
    assert!(!state.is_authenticated());
    assert!(!state.is_privileged());
}

// =============================================================
// Restore
// =============================================================

#[test]
fn restore_with_valid_storage_authenticates() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "tok");
    storage.set_item(USER_KEY, &serde_json::to_string(&make_user(false)).unwrap());
    let cell = RefCell::new(AuthState::default());

    make_session(&storage).restore(&cell);

    let state = cell.snapshot();
    assert!(state.is_authenticated());
    assert_eq!(state.user, Some(make_user(false)));
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn restore_with_empty_token_settles_signed_out() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "");
    storage.set_item(USER_KEY, &serde_json::to_string(&make_user(false)).unwrap());
    let cell = RefCell::new(AuthState::default());

    make_session(&storage).restore(&cell);

    let state = cell.snapshot();
    assert!(!state.is_authenticated());
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn restore_with_empty_identity_settles_signed_out_without_error() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "tok");
    storage.set_item(USER_KEY, "");
    let cell = RefCell::new(AuthState::default());

    make_session(&storage).restore(&cell);

    let state = cell.snapshot();
    assert!(!state.is_authenticated());
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(storage.contains(TOKEN_KEY));
}

#[test]
fn restore_accepts_record_written_by_older_builds() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "mock-admin-jwt-token");
    storage.set_item(
        USER_KEY,
        r#"{"id":"admin123","email":"admin@example.com","name":"Admin User","isAdmin":true}"#,
    );
    let cell = RefCell::new(AuthState::default());

    make_session(&storage).restore(&cell);

    assert!(cell.snapshot().is_privileged());
}

#[test]
fn restore_with_corrupt_identity_clears_storage_and_reports_expiry() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "tok");
    storage.set_item(USER_KEY, "{not json");
    let cell = RefCell::new(AuthState::default());

    make_session(&storage).restore(&cell);

    let state = cell.snapshot();
    assert!(!state.is_authenticated());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Session expired. Please login again."));
    assert!(storage.is_empty());
}

#[test]
fn restore_with_missing_token_settles_signed_out_without_error() {
    let storage = MemoryStorage::new();
    storage.set_item(USER_KEY, &serde_json::to_string(&make_user(false)).unwrap());
    let cell = RefCell::new(AuthState::default());

    make_session(&storage).restore(&cell);

    assert_eq!(cell.snapshot(), AuthState::signed_out());
}

#[test]
fn restore_with_empty_storage_settles_signed_out() {
    let storage = MemoryStorage::new();
    let cell = RefCell::new(AuthState::default());
    make_session(&storage).restore(&cell);
    assert_eq!(cell.snapshot(), AuthState::signed_out());
}

// =============================================================
// Establish
// =============================================================

#[test]
fn establish_student_is_not_privileged() {
    let storage = MemoryStorage::new();
    let session = make_session(&storage);
    let cell = settled_cell();

    block_on(session.establish(&cell, "student@example.com", "secret")).unwrap();

    let state = cell.snapshot();
    assert!(state.is_authenticated());
    assert!(!state.is_privileged());
    assert!(!state.loading);
    assert_eq!(state.user.unwrap().email, "student@example.com");
}

#[test]
fn establish_admin_is_privileged() {
    let storage = MemoryStorage::new();
    let session = make_session(&storage);
    let cell = settled_cell();

    block_on(session.establish(&cell, "admin@example.com", "secret")).unwrap();

    assert!(cell.snapshot().is_privileged());
}

#[test]
fn establish_persists_token_and_identity() {
    let storage = MemoryStorage::new();
    let session = make_session(&storage);
    let cell = settled_cell();

    block_on(session.establish(&cell, "student@example.com", "secret")).unwrap();

    assert!(storage.get_item(TOKEN_KEY).is_some());
    let raw = storage.get_item(USER_KEY).unwrap();
    let stored: User = serde_json::from_str(&raw).unwrap();
    assert_eq!(Some(stored), cell.snapshot().user);
}

#[test]
fn establish_then_restore_in_new_page_recovers_session() {
    let storage = MemoryStorage::new();
    let cell = settled_cell();
    block_on(make_session(&storage).establish(&cell, "student@example.com", "pw")).unwrap();

    let reloaded = RefCell::new(AuthState::default());
    make_session(&storage).restore(&reloaded);

    assert_eq!(reloaded.snapshot().user, cell.snapshot().user);
}

#[test]
fn establish_sets_loading_while_in_flight() {
    let storage = MemoryStorage::new();
    let session = make_session(&storage);
    let cell = RecordingCell::new();

    block_on(session.establish(&cell, "student@example.com", "pw")).unwrap();

    let history = cell.history.borrow();
    assert_eq!(history.len(), 2);
    assert!(history[0].loading);
    assert!(!history[0].is_authenticated());
    assert!(!history[1].loading);
    assert!(history[1].is_authenticated());
}

#[test]
fn establish_failure_keeps_identity_and_sets_error() {
    let storage = MemoryStorage::new();
    let session = SessionStore::new(&storage, RejectingBackend);
    let cell = settled_cell();

    let result = block_on(session.establish(&cell, "student@example.com", "pw"));

    assert!(matches!(result, Err(SessionError::AuthenticationFailed(_))));
    let state = cell.snapshot();
    assert!(!state.is_authenticated());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Login failed. Please try again."));
    assert!(storage.is_empty());
}

#[test]
fn establish_with_empty_secret_is_rejected_by_demo_backend() {
    let storage = MemoryStorage::new();
    let session = make_session(&storage);
    let cell = settled_cell();

    let result = block_on(session.establish(&cell, "student@example.com", ""));

    assert!(result.is_err());
    assert!(!cell.snapshot().is_authenticated());
}

#[test]
fn establish_clears_previous_error() {
    let storage = MemoryStorage::new();
    let session = make_session(&storage);
    let cell = RefCell::new(AuthState {
        error: Some("Session expired. Please login again.".to_owned()),
        ..AuthState::signed_out()
    });

    block_on(session.establish(&cell, "student@example.com", "pw")).unwrap();

    assert!(cell.snapshot().error.is_none());
}

// =============================================================
// Verify
// =============================================================

#[test]
fn verify_with_expected_code_authenticates() {
    let storage = MemoryStorage::new();
    let session = make_session(&storage);
    let cell = settled_cell();

    block_on(session.verify(&cell, "new@uni.edu", "123456")).unwrap();

    let state = cell.snapshot();
    assert!(state.is_authenticated());
    assert!(!state.is_privileged());
    assert!(storage.contains(TOKEN_KEY));
    assert!(storage.contains(USER_KEY));
}

#[test]
fn verify_with_other_codes_fails_and_stays_signed_out() {
    let storage = MemoryStorage::new();
    let session = make_session(&storage);

    for code in ["654321", "000000", "12345a", "12345", "1234567"] {
        let cell = settled_cell();
        let result = block_on(session.verify(&cell, "new@uni.edu", code));
        assert_eq!(result, Err(SessionError::InvalidCode), "code {code}");
        let state = cell.snapshot();
        assert!(!state.is_authenticated());
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Invalid OTP code"));
    }
    assert!(storage.is_empty());
}

#[test]
fn verify_respects_configured_code() {
    let storage = MemoryStorage::new();
    let config = AppConfig {
        otp_code: "246810".to_owned(),
        ..AppConfig::instant()
    };
    let session = SessionStore::new(&storage, DemoAuthBackend::new(config));
    let cell = settled_cell();

    assert!(block_on(session.verify(&cell, "new@uni.edu", "123456")).is_err());
    assert!(block_on(session.verify(&cell, "new@uni.edu", "246810")).is_ok());
}

#[test]
fn verify_never_grants_privilege() {
    let storage = MemoryStorage::new();
    let session = make_session(&storage);
    let cell = settled_cell();

    block_on(session.verify(&cell, "admin@example.com", "123456")).unwrap();

    assert!(!cell.snapshot().is_privileged());
}

// =============================================================
// Register
// =============================================================

fn make_registration() -> Registration {
    RegistrationForm {
        name: "Jamie".to_owned(),
        email: "jamie@uni.edu".to_owned(),
        student_id: "S12345".to_owned(),
        password: "long-enough".to_owned(),
        confirm_password: "long-enough".to_owned(),
    }
    .validate()
    .unwrap()
}

#[test]
fn register_returns_confirmation_without_signing_in() {
    let storage = MemoryStorage::new();
    let session = make_session(&storage);
    let cell = settled_cell();

    let message = block_on(session.register(&cell, &make_registration())).unwrap();

    assert!(message.contains("OTP verification"));
    assert_eq!(cell.snapshot(), AuthState::signed_out());
    assert!(storage.is_empty());
}

#[test]
fn register_failure_records_error() {
    let storage = MemoryStorage::new();
    let session = SessionStore::new(&storage, RejectingBackend);
    let cell = settled_cell();

    assert!(block_on(session.register(&cell, &make_registration())).is_err());
    let state = cell.snapshot();
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Registration failed. Please try again."));
}

// =============================================================
// Clear
// =============================================================

#[test]
fn clear_after_establish_removes_everything() {
    let storage = MemoryStorage::new();
    let session = make_session(&storage);
    let cell = settled_cell();

    for email in ["student@example.com", "admin@example.com"] {
        block_on(session.establish(&cell, email, "pw")).unwrap();
        session.clear(&cell);

        let state = cell.snapshot();
        assert!(!state.is_authenticated());
        assert!(state.user.is_none());
        assert!(!state.loading);
        assert!(!storage.contains(TOKEN_KEY));
        assert!(!storage.contains(USER_KEY));
    }
}

#[test]
fn clear_when_signed_out_is_harmless() {
    let storage = MemoryStorage::new();
    let cell = settled_cell();
    make_session(&storage).clear(&cell);
    assert_eq!(cell.snapshot(), AuthState::signed_out());
}

#[test]
fn demo_accounts_land_on_their_home_pages() {
    let storage = MemoryStorage::new();
    let session = make_session(&storage);

    let cell = settled_cell();
    block_on(session.establish(&cell, DEMO_STUDENT_EMAIL, "password")).unwrap();
    assert!(!cell.snapshot().is_privileged());
    assert_eq!(post_sign_in_path(&cell.snapshot()), "/elections");

    session.clear(&cell);
    block_on(session.establish(&cell, DEMO_ADMIN_EMAIL, "password")).unwrap();
    assert!(cell.snapshot().is_privileged());
    assert_eq!(post_sign_in_path(&cell.snapshot()), "/admin");
}
