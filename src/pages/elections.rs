//! Elections list with status badges and per-election actions.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::A;

use crate::components::loading_spinner::LoadingSpinner;
use crate::config::AppConfig;
use crate::net::types::{ElectionAction, ElectionStatus, ElectionSummary, format_timestamp};

#[component]
pub fn ElectionsPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let elections = RwSignal::new(None::<Vec<ElectionSummary>>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let list = crate::net::api::fetch_elections(&config).await;
        elections.try_set(Some(list));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = config;

    view! {
        <div class="elections-page">
            <h1>"Elections"</h1>
            <p class="elections-page__subtitle">"Active, upcoming and completed union elections."</p>
            {move || match elections.get() {
                None => view! { <LoadingSpinner label="Loading elections..."/> }.into_any(),
                Some(list) if list.is_empty() => {
                    view! { <p class="elections-page__empty">"No elections are scheduled."</p> }.into_any()
                }
                Some(list) => list.into_iter().map(election_card).collect_view().into_any(),
            }}
        </div>
    }
}

fn status_class(status: ElectionStatus) -> &'static str {
    match status {
        ElectionStatus::Active => "badge badge--active",
        ElectionStatus::Upcoming => "badge badge--upcoming",
        ElectionStatus::Completed => "badge badge--completed",
    }
}

fn election_card(election: ElectionSummary) -> impl IntoView {
    let actions = election
        .actions()
        .into_iter()
        .map(|action| {
            let (href, label) = match action {
                ElectionAction::Vote => (format!("/vote/{}", election.id), "Vote Now"),
                ElectionAction::ViewDetails => (format!("/elections#{}", election.id), "View Details"),
                ElectionAction::ViewResults => (format!("/results/{}", election.id), "View Results"),
            };
            view! { <A href=href>{label}</A> }
        })
        .collect_view();
    let positions = election
        .positions
        .iter()
        .map(|p| format!("{} ({} candidates)", p.title, p.candidates))
        .collect::<Vec<_>>()
        .join(", ");
    let has_voted = election.has_voted;

    view! {
        <article class="election-card" id=election.id.clone()>
            <header class="election-card__header">
                <h2>{election.title.clone()}</h2>
                <span class=status_class(election.status)>{election.status.label()}</span>
                <Show when=move || has_voted>
                    <span class="badge badge--voted">"Voted"</span>
                </Show>
            </header>
            <p>{election.description.clone()}</p>
            <dl class="election-card__meta">
                <dt>"Opens"</dt>
                <dd>{format_timestamp(&election.start_date)}</dd>
                <dt>"Closes"</dt>
                <dd>{format_timestamp(&election.end_date)}</dd>
                <dt>"Location"</dt>
                <dd>{election.location.clone()}</dd>
                <dt>"Positions"</dt>
                <dd>{positions}</dd>
            </dl>
            <footer class="election-card__actions">{actions}</footer>
        </article>
    }
}
