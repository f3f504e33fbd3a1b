//! Shared data shapes for the session, elections, ballots and results.
//!
//! DESIGN
//! ======
//! Field names follow the persisted/demo JSON shapes (`camelCase`) through
//! serde renames so the Rust side keeps snake_case while `userData` stays
//! reload-compatible with sessions written by earlier builds.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identity of the signed-in user, persisted under the `userData` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque user identifier.
    pub id: String,
    /// Address the user signed in with.
    pub email: String,
    /// Name shown in the navigation bar.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Whether the account may open the admin console.
    #[serde(rename = "isAdmin")]
    pub is_privileged: bool,
}

/// Lifecycle phase of an election.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectionStatus {
    Active,
    Upcoming,
    Completed,
}

impl ElectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Upcoming => "Upcoming",
            Self::Completed => "Completed",
        }
    }
}

/// Primary action offered for an election card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElectionAction {
    /// Open the voting booth.
    Vote,
    /// Show details only (not yet open, or already voted).
    ViewDetails,
    /// Open the results page.
    ViewResults,
}

/// Contested position as listed on the elections page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSummary {
    pub id: String,
    pub title: String,
    /// Number of candidates standing.
    pub candidates: u32,
}

/// Election card data for the elections list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Local ISO 8601 timestamp, e.g. `2025-05-15T09:00:00`.
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub status: ElectionStatus,
    pub has_voted: bool,
    pub positions: Vec<PositionSummary>,
}

impl ElectionSummary {
    /// Actions offered on the card, in display order.
    pub fn actions(&self) -> Vec<ElectionAction> {
        let mut actions = Vec::new();
        if self.status == ElectionStatus::Active && !self.has_voted {
            actions.push(ElectionAction::Vote);
        }
        if self.status == ElectionStatus::Upcoming || self.has_voted {
            actions.push(ElectionAction::ViewDetails);
        }
        if self.status == ElectionStatus::Completed {
            actions.push(ElectionAction::ViewResults);
        }
        actions
    }
}

/// Header data for the voting booth.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub status: ElectionStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub manifesto: String,
    pub image_url: Option<String>,
}

/// Position on a ballot with its full candidate slate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub title: String,
    pub description: String,
    pub candidates: Vec<Candidate>,
}

impl Position {
    pub fn has_candidate(&self, candidate_id: &str) -> bool {
        self.candidates.iter().any(|c| c.id == candidate_id)
    }
}

/// Vote count for one candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub id: String,
    pub name: String,
    pub votes: u32,
    /// Share of the position's votes, one decimal place.
    pub percentage: f64,
}

/// Tally for one position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionResult {
    pub id: String,
    pub title: String,
    pub candidates: Vec<CandidateResult>,
}

impl PositionResult {
    /// Build a tally from raw counts, deriving each candidate's percentage.
    pub fn from_counts(id: &str, title: &str, counts: &[(&str, &str, u32)]) -> Self {
        let total: u32 = counts.iter().map(|(_, _, votes)| votes).sum();
        let candidates = counts
            .iter()
            .map(|(id, name, votes)| CandidateResult {
                id: (*id).to_owned(),
                name: (*name).to_owned(),
                votes: *votes,
                percentage: percent(*votes, total),
            })
            .collect();
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            candidates,
        }
    }

    /// Candidates ordered by votes descending; ties keep name order.
    pub fn standings(&self) -> Vec<&CandidateResult> {
        let mut ranked: Vec<&CandidateResult> = self.candidates.iter().collect();
        ranked.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.name.cmp(&b.name)));
        ranked
    }

    pub fn leader(&self) -> Option<&CandidateResult> {
        self.standings().into_iter().next()
    }

    pub fn total_votes(&self) -> u32 {
        self.candidates.iter().map(|c| c.votes).sum()
    }
}

/// Published results of an election.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionResults {
    pub election_id: String,
    pub title: String,
    pub total_voters: u32,
    pub total_votes_cast: u32,
    pub positions: Vec<PositionResult>,
}

impl ElectionResults {
    /// Share of registered voters who cast a ballot, one decimal place.
    pub fn turnout_percent(&self) -> f64 {
        percent(self.total_votes_cast, self.total_voters)
    }
}

/// Headline numbers for the admin dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_elections: u32,
    pub total_voters: u32,
    pub registered_candidates: u32,
    pub votes_submitted: u32,
    pub pending_approvals: u32,
    pub voter_turnout: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    VoterRegistration,
    CandidateNomination,
    VoteCast,
}

/// One line of the admin activity feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    /// Local ISO 8601 timestamp.
    pub timestamp: String,
}

/// Everything the admin dashboard renders from one fetch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityEntry>,
}

/// Election header plus the positions a voter fills in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionBallot {
    pub election: ElectionDetail,
    pub positions: Vec<Position>,
}

/// Render a local ISO 8601 timestamp as `May 15, 2025, 09:00`.
///
/// Seconds are optional. Values that are not a real calendar date and time
/// are returned unchanged.
pub fn format_timestamp(value: &str) -> String {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map(|at| at.format("%b %-d, %Y, %H:%M").to_string())
        .unwrap_or_else(|_| value.to_owned())
}

/// `part / whole * 100` rounded to one decimal; zero when `whole` is zero.
pub fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = f64::from(part) / f64::from(whole) * 100.0;
    (raw * 10.0).round() / 10.0
}
