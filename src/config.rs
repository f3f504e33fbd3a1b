//! Runtime knobs for the demo backend and page timers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides one `AppConfig` through context. Pages and the session
//! store read latencies and the demo auth policy from it instead of
//! hardcoding them at call sites.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

/// Fixed code accepted by the demo one-time-code check.
pub const DEMO_OTP_CODE: &str = "123456";

/// Ordinary student account offered by the demo quick sign-in.
pub const DEMO_STUDENT_EMAIL: &str = "student@example.com";

/// Account that the demo backend signs in with elevated privilege.
pub const DEMO_ADMIN_EMAIL: &str = "admin@example.com";

/// Application configuration shared through Leptos context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Simulated latency of sign-in, verify, register and resend calls.
    pub auth_round_trip: Duration,
    /// Simulated latency of ballot and nomination submissions.
    pub submit_round_trip: Duration,
    /// Simulated latency of election, results and dashboard fetches.
    pub fetch_round_trip: Duration,
    /// Code the demo backend accepts for account verification.
    pub otp_code: String,
    /// Seconds the OTP page waits before allowing another resend.
    pub otp_resend_cooldown_secs: u32,
    /// Emails the demo backend treats as administrators.
    ///
    /// Placeholder for real authorization; never populate this from user
    /// input in a deployed build.
    pub privileged_emails: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth_round_trip: Duration::from_millis(1000),
            submit_round_trip: Duration::from_millis(1500),
            fetch_round_trip: Duration::from_millis(1000),
            otp_code: DEMO_OTP_CODE.to_owned(),
            otp_resend_cooldown_secs: 30,
            privileged_emails: vec![DEMO_ADMIN_EMAIL.to_owned()],
        }
    }
}

impl AppConfig {
    /// Same policy as [`AppConfig::default`] with every simulated delay removed.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            auth_round_trip: Duration::ZERO,
            submit_round_trip: Duration::ZERO,
            fetch_round_trip: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Whether the demo policy grants elevated privilege to `email`.
    ///
    /// Comparison ignores surrounding whitespace and ASCII case.
    #[must_use]
    pub fn is_privileged_email(&self, email: &str) -> bool {
        let email = email.trim();
        self.privileged_emails
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(email))
    }
}
