//! Admin console: headline election stats and the recent activity feed.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::loading_spinner::LoadingSpinner;
use crate::config::AppConfig;
use crate::net::types::{ActivityEntry, ActivityKind, DashboardStats, format_timestamp};

#[component]
pub fn AdminPage() -> impl IntoView {
    let config = StoredValue::new(expect_context::<AppConfig>());

    let snapshot = LocalResource::new(move || {
        let config = config.get_value();
        async move { crate::net::api::fetch_dashboard(&config).await }
    });

    view! {
        <div class="admin-page">
            <header class="admin-page__header">
                <h1>"Admin Dashboard"</h1>
                <nav class="admin-page__links">
                    <A href="/elections">"Elections"</A>
                    <A href="/nominate">"Nominations"</A>
                </nav>
            </header>
            <Suspense fallback=move || view! { <LoadingSpinner label="Loading dashboard..."/> }>
                {move || {
                    snapshot
                        .get()
                        .map(|snapshot| {
                            view! {
                                {stat_cards(&snapshot.stats)}
                                <section class="admin-page__activity">
                                    <h2>"Recent Activity"</h2>
                                    <ul>{snapshot.recent_activity.iter().map(activity_row).collect_view()}</ul>
                                </section>
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

fn stat_cards(stats: &DashboardStats) -> impl IntoView + use<> {
    let cards = [
        ("Active Elections", stats.active_elections.to_string()),
        ("Registered Voters", stats.total_voters.to_string()),
        ("Candidates", stats.registered_candidates.to_string()),
        ("Votes Submitted", stats.votes_submitted.to_string()),
        ("Pending Approvals", stats.pending_approvals.to_string()),
        ("Voter Turnout", format!("{:.1}%", stats.voter_turnout)),
    ];
    let cards = cards
        .into_iter()
        .map(|(label, value)| {
            view! {
                <div class="stat-card">
                    <span class="stat-card__value">{value}</span>
                    <span class="stat-card__label">{label}</span>
                </div>
            }
        })
        .collect_view();
    view! { <section class="admin-page__stats">{cards}</section> }
}

fn activity_class(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::VoterRegistration => "activity activity--registration",
        ActivityKind::CandidateNomination => "activity activity--nomination",
        ActivityKind::VoteCast => "activity activity--vote",
    }
}

fn activity_row(entry: &ActivityEntry) -> impl IntoView + use<> {
    view! {
        <li class=activity_class(entry.kind)>
            <span class="activity__message">{entry.message.clone()}</span>
            <time class="activity__time" datetime=entry.timestamp.clone()>
                {format_timestamp(&entry.timestamp)}
            </time>
        </li>
    }
}
