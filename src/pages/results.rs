//! Published results for a completed election.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::components::loading_spinner::LoadingSpinner;
use crate::config::AppConfig;
use crate::net::types::{ElectionResults, PositionResult};

#[derive(Clone, Debug, PartialEq)]
enum Tally {
    Loading,
    Missing,
    Ready(ElectionResults),
}

#[component]
pub fn ResultsPage() -> impl IntoView {
    let config = StoredValue::new(expect_context::<AppConfig>());
    let params = use_params_map();
    let tally = RwSignal::new(Tally::Loading);
    let tab = RwSignal::new(0_usize);

    Effect::new(move || {
        let election_id = params.read().get("id").unwrap_or_default();
        tally.set(Tally::Loading);
        tab.set(0);
        let config = config.get_value();
        leptos::task::spawn_local(async move {
            let loaded = crate::net::api::fetch_results(&config, &election_id).await;
            tally.try_set(loaded.map_or(Tally::Missing, Tally::Ready));
        });
    });

    view! {
        <div class="results-page">
            <A href="/elections">"Back to Elections"</A>
            {move || match tally.get() {
                Tally::Loading => view! { <LoadingSpinner label="Loading results..."/> }.into_any(),
                Tally::Missing => {
                    view! {
                        <div class="results-page__missing">
                            <h2>"Results Not Available"</h2>
                            <p>"No published results exist for this election."</p>
                        </div>
                    }
                        .into_any()
                }
                Tally::Ready(results) => results_view(&results, tab).into_any(),
            }}
        </div>
    }
}

fn results_view(results: &ElectionResults, tab: RwSignal<usize>) -> impl IntoView + use<> {
    let active = tab.get().min(results.positions.len().saturating_sub(1));
    let tabs = results
        .positions
        .iter()
        .enumerate()
        .map(|(index, position)| {
            view! {
                <button
                    class="results-tab"
                    class:results-tab--current={index == active}
                    on:click=move |_| tab.set(index)
                >
                    {position.title.clone()}
                </button>
            }
        })
        .collect_view();
    let detail = results.positions.get(active).map(position_view);

    view! {
        <header class="results-page__header">
            <h1>{format!("{} Results", results.title)}</h1>
            <dl class="results-page__summary">
                <dt>"Registered Voters"</dt>
                <dd>{results.total_voters}</dd>
                <dt>"Votes Cast"</dt>
                <dd>{results.total_votes_cast}</dd>
                <dt>"Turnout"</dt>
                <dd>{format!("{:.1}%", results.turnout_percent())}</dd>
            </dl>
        </header>
        <nav class="results-page__tabs">{tabs}</nav>
        {detail}
    }
}

fn position_view(position: &PositionResult) -> impl IntoView + use<> {
    let winner = position.leader().map(|c| c.id.clone());
    let rows = position
        .standings()
        .into_iter()
        .enumerate()
        .map(|(rank, candidate)| {
            let leading = winner.as_deref() == Some(candidate.id.as_str());
            view! {
                <li class="standing" class:standing--winner=leading>
                    <span class="standing__rank">{rank + 1}</span>
                    <span class="standing__name">{candidate.name.clone()}</span>
                    <span class="standing__votes">{format!("{} votes", candidate.votes)}</span>
                    <div class="standing__bar">
                        <div
                            class="standing__fill"
                            style=format!("width: {:.1}%", candidate.percentage)
                        ></div>
                    </div>
                    <span class="standing__share">{format!("{:.1}%", candidate.percentage)}</span>
                </li>
            }
        })
        .collect_view();

    view! {
        <section class="results-position">
            <h2>{position.title.clone()}</h2>
            <p class="results-position__total">
                {format!("{} total votes", position.total_votes())}
            </p>
            <ol class="results-position__standings">{rows}</ol>
        </section>
    }
}
