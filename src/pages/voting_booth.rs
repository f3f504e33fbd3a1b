//! Voting booth: walk the positions, pick one candidate each, confirm.
//!
//! SYSTEM CONTEXT
//! ==============
//! Ballot rules live in `state::ballot::Ballot`; this page only renders the
//! current `BoothStep` and forwards clicks. Submission goes to the demo
//! service and returns the voter to `/elections`.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::loading_spinner::LoadingSpinner;
use crate::config::AppConfig;
use crate::state::ballot::{Ballot, BallotError, BoothStep};

#[derive(Clone, Debug, PartialEq)]
enum Booth {
    Loading,
    Missing,
    Open(Ballot),
}

type BallotEdit<'a> = &'a dyn Fn(&mut Ballot) -> Result<(), BallotError>;

#[component]
pub fn VotingBoothPage() -> impl IntoView {
    let config = StoredValue::new(expect_context::<AppConfig>());
    let params = use_params_map();
    let navigate = use_navigate();

    let booth = RwSignal::new(Booth::Loading);
    let info = RwSignal::new(String::new());

    Effect::new(move || {
        let election_id = params.read().get("id").unwrap_or_default();
        booth.set(Booth::Loading);
        let config = config.get_value();
        leptos::task::spawn_local(async move {
            let loaded = crate::net::api::fetch_ballot(&config, &election_id)
                .await
                .and_then(|data| Ballot::new(data).ok());
            // The page may be gone by the time the fetch resolves.
            booth.try_set(loaded.map_or(Booth::Missing, Booth::Open));
        });
    });

    Effect::new(move || {
        let submitted = booth.with(|b| matches!(b, Booth::Open(ballot) if ballot.step() == BoothStep::Submitted));
        if submitted {
            navigate("/elections", NavigateOptions::default());
        }
    });

    let act = move |edit: BallotEdit<'_>| {
        let outcome = booth.try_update(|b| match b {
            Booth::Open(ballot) => edit(ballot),
            _ => Ok(()),
        });
        match outcome {
            Some(Err(e)) => info.set(e.to_string()),
            _ => info.set(String::new()),
        }
    };

    let submit = move || {
        let submission = booth
            .try_update(|b| match b {
                Booth::Open(ballot) => ballot.begin_submit().ok(),
                _ => None,
            })
            .flatten();
        let Some(submission) = submission else {
            return;
        };
        let config = config.get_value();
        leptos::task::spawn_local(async move {
            let result = crate::net::api::submit_ballot(&config, &submission).await;
            if let Err(e) = &result {
                info.try_set(e.clone());
            }
            booth.try_update(|b| {
                if let Booth::Open(ballot) = b {
                    ballot.finish_submit(result.is_ok());
                }
            });
        });
    };

    view! {
        <div class="booth-page">
            <A href="/elections">"Back to Elections"</A>
            {move || match booth.get() {
                Booth::Loading => view! { <LoadingSpinner label="Loading ballot..."/> }.into_any(),
                Booth::Missing => {
                    view! {
                        <div class="booth-page__missing">
                            <h2>"Election Not Found"</h2>
                            <p>"The election you're looking for does not exist or is not open for voting."</p>
                            <A href="/elections">"Return to Elections"</A>
                        </div>
                    }
                        .into_any()
                }
                Booth::Open(ballot) => booth_view(&ballot, act, submit).into_any(),
            }}
            <Show when=move || !info.get().is_empty()>
                <p class="booth-page__message">{move || info.get()}</p>
            </Show>
        </div>
    }
}

fn booth_view<Act, Submit>(ballot: &Ballot, act: Act, submit: Submit) -> impl IntoView + use<Act, Submit>
where
    Act: Fn(BallotEdit<'_>) + Copy + 'static,
    Submit: Fn() + Copy + 'static,
{
    let step = ballot.step();
    let current = ballot.current_index();
    let position = ballot.current_position().clone();
    let selected = ballot.selection(current).map(str::to_owned);
    let total = ballot.positions().len();

    let tabs = ballot
        .positions()
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let chosen = ballot.selection(index).is_some();
            view! {
                <button
                    class="booth-tab"
                    class:booth-tab--current={index == current}
                    class:booth-tab--chosen=chosen
                    on:click=move |_| act(&move |b: &mut Ballot| b.go_to(index))
                >
                    {p.title.clone()}
                </button>
            }
        })
        .collect_view();

    let candidates = position
        .candidates
        .iter()
        .map(|candidate| {
            let id = candidate.id.clone();
            let is_selected = selected.as_deref() == Some(candidate.id.as_str());
            view! {
                <button
                    class="candidate-card"
                    class:candidate-card--selected=is_selected
                    on:click=move |_| act(&|b: &mut Ballot| b.select(&id))
                >
                    <h3>{candidate.name.clone()}</h3>
                    <p class="candidate-card__bio">{candidate.bio.clone()}</p>
                    <p class="candidate-card__manifesto">{candidate.manifesto.clone()}</p>
                </button>
            }
        })
        .collect_view();

    let reviewing = matches!(step, BoothStep::Review | BoothStep::Submitting);
    let submitting = step == BoothStep::Submitting;
    let review = reviewing.then(|| {
        let summary = ballot
            .positions()
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let name = ballot
                    .selection(index)
                    .and_then(|id| p.candidates.iter().find(|c| c.id == id))
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                view! {
                    <li>
                        <strong>{p.title.clone()}</strong>
                        ": "
                        {name}
                    </li>
                }
            })
            .collect_view();
        view! {
            <div class="modal">
                <div class="modal__body">
                    <h2>"Confirm Your Vote"</h2>
                    <p>"Please review your selections. Once submitted, your vote cannot be changed."</p>
                    <ul class="modal__summary">{summary}</ul>
                    <div class="modal__actions">
                        <button
                            disabled=submitting
                            on:click=move |_| {
                                act(&|b: &mut Ballot| {
                                    b.back_to_ballot();
                                    Ok(())
                                });
                            }
                        >
                            "Go Back"
                        </button>
                        <button class="modal__confirm" disabled=submitting on:click=move |_| submit()>
                            {if submitting { "Submitting..." } else { "Submit Vote" }}
                        </button>
                    </div>
                </div>
            </div>
        }
    });

    let next_label = if ballot.is_last() { "Review Ballot" } else { "Next" };
    let at_first = current == 0;

    view! {
        <header class="booth-page__header">
            <h1>{ballot.election.title.clone()}</h1>
            <p>{ballot.election.description.clone()}</p>
        </header>
        <section class="booth-progress">
            <span>{format!("Position {} of {}", current + 1, total)}</span>
            <div class="booth-progress__bar">
                <div
                    class="booth-progress__fill"
                    style=format!("width: {:.0}%", ballot.progress_percent())
                ></div>
            </div>
            <nav class="booth-progress__tabs">{tabs}</nav>
        </section>
        <section class="booth-position">
            <h2>{position.title.clone()}</h2>
            <p>{position.description.clone()}</p>
            <div class="booth-position__candidates">{candidates}</div>
        </section>
        <footer class="booth-page__nav">
            <button disabled=at_first on:click=move |_| act(&Ballot::previous)>
                "Previous"
            </button>
            <button on:click=move |_| act(&Ballot::next)>{next_label}</button>
        </footer>
        {review}
    }
}
