//! Demo backend standing in for the voting service API.
//!
//! Every call waits a fixed simulated round trip and answers from built-in
//! data. Client-side (hydrate) the wait is a real timer via `gloo-timers`;
//! natively (tests, SSR) it resolves immediately.
//!
//! DESIGN
//! ======
//! Auth calls sit behind [`AuthBackend`] so a real HTTP client can replace
//! [`DemoAuthBackend`] without touching the session store. Data calls are
//! plain async functions because nothing else depends on their shape.
//!
//! ERROR HANDLING
//! ==============
//! Auth failures are [`SessionError`]s recorded by the session store; data
//! fetches return `Option` (unknown election) and submissions return
//! `Result<_, String>` so pages can show the message and stay interactive.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;
use std::time::Duration;

use uuid::Uuid;

use super::types::{
    ActivityEntry, ActivityKind, Candidate, DashboardSnapshot, DashboardStats, ElectionBallot,
    ElectionDetail, ElectionResults, ElectionStatus, ElectionSummary, Position, PositionResult,
    PositionSummary, User, percent,
};
use crate::config::AppConfig;
use crate::state::auth::SessionError;
use crate::state::ballot::BallotSubmission;
use crate::state::nomination::Nomination;
use crate::util::validate::{OTP_LEN, Registration};

/// Token and identity returned by a successful sign-in or verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionGrant {
    pub token: String,
    pub user: User,
}

/// Remote side of the session store's operations.
pub trait AuthBackend {
    /// Exchange credentials for a session.
    fn sign_in(&self, email: &str, secret: &str) -> impl Future<Output = Result<SessionGrant, SessionError>>;

    /// Exchange a one-time code for a session on a freshly registered account.
    fn verify_code(&self, email: &str, code: &str) -> impl Future<Output = Result<SessionGrant, SessionError>>;

    /// Create an account and send its one-time code. Returns a confirmation message.
    fn register(&self, registration: &Registration) -> impl Future<Output = Result<String, SessionError>>;

    /// Send a fresh one-time code. Returns a confirmation message.
    fn resend_code(&self, email: &str) -> impl Future<Output = Result<String, SessionError>>;
}

/// Wait out a simulated network round trip.
pub async fn round_trip(delay: Duration) {
    #[cfg(feature = "hydrate")]
    {
        if !delay.is_zero() {
            gloo_timers::future::sleep(delay).await;
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = delay;
    }
}

fn new_token(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// Accepts any non-empty credentials and the configured one-time code.
///
/// Privilege comes from [`AppConfig::privileged_emails`]. That list is a
/// demo placeholder for real authorization and is logged whenever it grants
/// admin access.
#[derive(Clone, Debug, Default)]
pub struct DemoAuthBackend {
    config: AppConfig,
}

impl DemoAuthBackend {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

impl AuthBackend for DemoAuthBackend {
    async fn sign_in(&self, email: &str, secret: &str) -> Result<SessionGrant, SessionError> {
        round_trip(self.config.auth_round_trip).await;
        let email = email.trim();
        if email.is_empty() || secret.is_empty() {
            return Err(SessionError::AuthenticationFailed(
                "Login failed. Please try again.".to_owned(),
            ));
        }
        let privileged = self.config.is_privileged_email(email);
        if privileged {
            leptos::logging::warn!("demo admin bypass granted elevated session to {email}");
        }
        let (prefix, name) = if privileged {
            ("demo-admin", "Admin User")
        } else {
            ("demo", "Test User")
        };
        Ok(SessionGrant {
            token: new_token(prefix),
            user: User {
                id: Uuid::new_v4().to_string(),
                email: email.to_owned(),
                display_name: name.to_owned(),
                is_privileged: privileged,
            },
        })
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<SessionGrant, SessionError> {
        round_trip(self.config.auth_round_trip).await;
        let code = code.trim();
        let well_formed = code.len() == OTP_LEN && code.bytes().all(|b| b.is_ascii_digit());
        if !well_formed || code != self.config.otp_code {
            return Err(SessionError::InvalidCode);
        }
        Ok(SessionGrant {
            token: new_token("demo-otp"),
            user: User {
                id: Uuid::new_v4().to_string(),
                email: email.trim().to_owned(),
                display_name: "New User".to_owned(),
                is_privileged: false,
            },
        })
    }

    async fn register(&self, registration: &Registration) -> Result<String, SessionError> {
        round_trip(self.config.auth_round_trip).await;
        leptos::logging::log!("registration accepted for {}", registration.email);
        Ok("Registration successful! Please check your email for OTP verification.".to_owned())
    }

    async fn resend_code(&self, email: &str) -> Result<String, SessionError> {
        round_trip(self.config.auth_round_trip).await;
        if email.trim().is_empty() {
            return Err(SessionError::Backend(
                "Email address is missing. Please register first.".to_owned(),
            ));
        }
        Ok("A new OTP has been sent to your email".to_owned())
    }
}

// =============================================================
// Election data
// =============================================================

fn position_summary(id: &str, title: &str, candidates: u32) -> PositionSummary {
    PositionSummary {
        id: id.to_owned(),
        title: title.to_owned(),
        candidates,
    }
}

fn demo_elections() -> Vec<ElectionSummary> {
    vec![
        ElectionSummary {
            id: "1".to_owned(),
            title: "Student Union President Election".to_owned(),
            description: "Vote for the next Student Union President who will represent student \
                          interests for the upcoming academic year."
                .to_owned(),
            start_date: "2025-05-15T09:00:00".to_owned(),
            end_date: "2025-05-16T17:00:00".to_owned(),
            location: "Online".to_owned(),
            status: ElectionStatus::Active,
            has_voted: false,
            positions: vec![
                position_summary("1", "President", 3),
                position_summary("2", "Vice President", 2),
            ],
        },
        ElectionSummary {
            id: "2".to_owned(),
            title: "Department Representatives Election".to_owned(),
            description: "Select representatives for each academic department to form the \
                          student council."
                .to_owned(),
            start_date: "2025-05-20T09:00:00".to_owned(),
            end_date: "2025-05-22T17:00:00".to_owned(),
            location: "Online".to_owned(),
            status: ElectionStatus::Upcoming,
            has_voted: false,
            positions: vec![
                position_summary("1", "Engineering Rep", 3),
                position_summary("2", "Business Rep", 4),
                position_summary("3", "Arts Rep", 2),
            ],
        },
        ElectionSummary {
            id: "3".to_owned(),
            title: "Student Budget Allocation Vote".to_owned(),
            description: "Vote on the proposed budget for student activities and facilities for \
                          the next academic year."
                .to_owned(),
            start_date: "2025-04-10T09:00:00".to_owned(),
            end_date: "2025-04-12T17:00:00".to_owned(),
            location: "Online".to_owned(),
            status: ElectionStatus::Completed,
            has_voted: true,
            positions: vec![position_summary("1", "Budget Approval", 2)],
        },
    ]
}

fn candidate(id: &str, name: &str, bio: &str, manifesto: &str) -> Candidate {
    Candidate {
        id: id.to_owned(),
        name: name.to_owned(),
        bio: bio.to_owned(),
        manifesto: manifesto.to_owned(),
        image_url: None,
    }
}

fn demo_positions() -> Vec<Position> {
    vec![
        Position {
            id: "1".to_owned(),
            title: "President".to_owned(),
            description: "The President will lead the Student Union and represent student \
                          interests to the university administration."
                .to_owned(),
            candidates: vec![
                candidate(
                    "101",
                    "Alex Johnson",
                    "Third-year Computer Science student with a passion for student advocacy.",
                    "Improve student facilities and create more opportunities for professional development.",
                ),
                candidate(
                    "102",
                    "Samantha Lee",
                    "Fourth-year Business major with experience in student government.",
                    "Increase transparency in union operations and expand student services.",
                ),
                candidate(
                    "103",
                    "Michael Rodriguez",
                    "Graduate student in Political Science with a background in community organizing.",
                    "Diversity, equity, and inclusion initiatives across campus.",
                ),
            ],
        },
        Position {
            id: "2".to_owned(),
            title: "Vice President".to_owned(),
            description: "The Vice President assists the President and oversees internal \
                          operations of the Student Union."
                .to_owned(),
            candidates: vec![
                candidate(
                    "201",
                    "Emily Chen",
                    "Third-year Psychology major with leadership experience in student organizations.",
                    "Strengthen the connection between students and the union through regular town halls.",
                ),
                candidate(
                    "202",
                    "David Wilson",
                    "Second-year Economics student with a background in event planning.",
                    "Improve communication channels and student events coordination.",
                ),
            ],
        },
    ]
}

/// List every election visible to a signed-in student.
pub async fn fetch_elections(config: &AppConfig) -> Vec<ElectionSummary> {
    round_trip(config.fetch_round_trip).await;
    demo_elections()
}

/// Load the ballot for `election_id`; `None` unless the election is open.
pub async fn fetch_ballot(config: &AppConfig, election_id: &str) -> Option<ElectionBallot> {
    round_trip(config.fetch_round_trip).await;
    let summary = demo_elections().into_iter().find(|e| e.id == election_id)?;
    if summary.status != ElectionStatus::Active {
        return None;
    }
    Some(ElectionBallot {
        election: ElectionDetail {
            id: summary.id,
            title: summary.title,
            description: summary.description,
            start_date: summary.start_date,
            end_date: summary.end_date,
            status: summary.status,
        },
        positions: demo_positions(),
    })
}

/// Record a completed ballot.
///
/// # Errors
///
/// Returns a message if the ballot carries no choices.
pub async fn submit_ballot(config: &AppConfig, submission: &BallotSubmission) -> Result<(), String> {
    round_trip(config.submit_round_trip).await;
    if submission.choices.is_empty() {
        return Err("Failed to submit your vote. Please try again.".to_owned());
    }
    leptos::logging::log!(
        "ballot recorded for election {} ({} positions)",
        submission.election_id,
        submission.choices.len()
    );
    Ok(())
}

/// Queue a nomination for admin review.
///
/// # Errors
///
/// Returns a message if the service rejects the nomination.
pub async fn submit_nomination(config: &AppConfig, nomination: &Nomination) -> Result<(), String> {
    round_trip(config.submit_round_trip).await;
    if nomination.position.position_id.is_empty() {
        return Err("Failed to submit your nomination. Please try again.".to_owned());
    }
    leptos::logging::log!("nomination received for position {}", nomination.position.title);
    Ok(())
}

/// Published results; `None` for unknown elections.
pub async fn fetch_results(config: &AppConfig, election_id: &str) -> Option<ElectionResults> {
    round_trip(config.fetch_round_trip).await;
    let summary = demo_elections().into_iter().find(|e| e.id == election_id)?;
    Some(ElectionResults {
        election_id: summary.id,
        title: summary.title,
        total_voters: 1253,
        total_votes_cast: 876,
        positions: vec![
            PositionResult::from_counts(
                "1",
                "President",
                &[
                    ("101", "Alex Johnson", 342),
                    ("102", "Samantha Lee", 289),
                    ("103", "Michael Rodriguez", 245),
                ],
            ),
            PositionResult::from_counts(
                "2",
                "Vice President",
                &[("201", "Emily Chen", 463), ("202", "David Wilson", 413)],
            ),
        ],
    })
}

fn activity(id: u32, kind: ActivityKind, message: &str, timestamp: &str) -> ActivityEntry {
    ActivityEntry {
        id,
        kind,
        message: message.to_owned(),
        timestamp: timestamp.to_owned(),
    }
}

/// Headline stats and recent activity for the admin console.
pub async fn fetch_dashboard(config: &AppConfig) -> DashboardSnapshot {
    round_trip(config.fetch_round_trip).await;
    let total_voters = 1253;
    let votes_submitted = 876;
    DashboardSnapshot {
        stats: DashboardStats {
            active_elections: 2,
            total_voters,
            registered_candidates: 28,
            votes_submitted,
            pending_approvals: 14,
            voter_turnout: percent(votes_submitted, total_voters),
        },
        recent_activity: vec![
            activity(1, ActivityKind::VoterRegistration, "New voter registration: Emma Wilson", "2025-05-10T14:23:00"),
            activity(
                2,
                ActivityKind::CandidateNomination,
                "New candidate nomination: Jake Thompson for Treasurer",
                "2025-05-10T13:45:00",
            ),
            activity(3, ActivityKind::VoteCast, "New vote cast in Student Union President Election", "2025-05-10T12:37:00"),
            activity(4, ActivityKind::VoterRegistration, "New voter registration: Carlos Mendez", "2025-05-10T11:52:00"),
            activity(
                5,
                ActivityKind::CandidateNomination,
                "New candidate nomination: Sarah Kim for Events Coordinator",
                "2025-05-10T10:18:00",
            ),
            activity(6, ActivityKind::VoteCast, "New vote cast in Department Representatives Election", "2025-05-10T09:45:00"),
        ],
    }
}
