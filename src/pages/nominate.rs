//! Four-step candidate nomination wizard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Step rules and validation live in `state::nomination::NominationWizard`.
//! The page re-renders only when the step changes, so typing into a field
//! never rebuilds the input under the cursor.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::config::AppConfig;
use crate::state::nomination::{NOMINATION_POSITIONS, NominationStep, NominationWizard, STEP_COUNT};

#[component]
pub fn NominatePage() -> impl IntoView {
    let config = StoredValue::new(expect_context::<AppConfig>());
    let navigate = use_navigate();

    let wizard = RwSignal::new(NominationWizard::new());
    let info = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);
    let submitted = RwSignal::new(false);
    let step_number = Memo::new(move |_| wizard.with(|w| w.step().number()));

    on_cleanup(move || {
        if let Some(url) = wizard.try_update_untracked(NominationWizard::detach_photo).flatten() {
            revoke_preview(&url);
        }
    });

    Effect::new(move || {
        if submitted.get() {
            navigate("/elections", NavigateOptions::default());
        }
    });

    let advance = move |_: leptos::ev::MouseEvent| match wizard.try_update(NominationWizard::advance) {
        Some(Err(e)) => info.set(e.to_string()),
        _ => info.set(String::new()),
    };
    let back = move |_: leptos::ev::MouseEvent| {
        wizard.update(NominationWizard::back);
        info.set(String::new());
    };
    let submit = move |_: leptos::ev::MouseEvent| {
        if submitting.get_untracked() {
            return;
        }
        let nomination = match wizard.with_untracked(NominationWizard::submit) {
            Ok(nomination) => nomination,
            Err(e) => {
                info.set(e.to_string());
                return;
            }
        };
        submitting.set(true);
        info.set(String::new());
        let config = config.get_value();
        leptos::task::spawn_local(async move {
            match crate::net::api::submit_nomination(&config, &nomination).await {
                Ok(()) => {
                    submitted.try_set(true);
                }
                Err(e) => {
                    info.try_set(e);
                }
            }
            submitting.try_set(false);
        });
    };

    view! {
        <div class="nominate-page">
            <A href="/elections">"Back to Elections"</A>
            <h1>"Candidate Nomination"</h1>
            <section class="wizard-progress">
                <span>
                    {move || {
                        wizard.with(|w| format!("Step {} of {STEP_COUNT}: {}", w.step().number(), w.step().title()))
                    }}
                </span>
                <div class="wizard-progress__bar">
                    <div
                        class="wizard-progress__fill"
                        style=move || wizard.with(|w| format!("width: {:.0}%", w.progress_percent()))
                    ></div>
                </div>
            </section>
            <div class="wizard-step">
                {move || match step_number.get() {
                    1 => position_step(wizard).into_any(),
                    2 => profile_step(wizard, info).into_any(),
                    3 => platform_step(wizard).into_any(),
                    _ => review_step(wizard).into_any(),
                }}
            </div>
            <Show when=move || !info.get().is_empty()>
                <p class="wizard-message">{move || info.get()}</p>
            </Show>
            <footer class="wizard-nav">
                <Show when=move || { step_number.get() > 1 }>
                    <button disabled=move || submitting.get() on:click=back>
                        "Back"
                    </button>
                </Show>
                <Show
                    when=move || { step_number.get() < STEP_COUNT }
                    fallback=move || {
                        view! {
                            <button class="wizard-submit" disabled=move || submitting.get() on:click=submit>
                                {move || if submitting.get() { "Submitting..." } else { "Submit Nomination" }}
                            </button>
                        }
                    }
                >
                    <button on:click=advance>"Continue"</button>
                </Show>
            </footer>
        </div>
    }
}

fn position_step(wizard: RwSignal<NominationWizard>) -> impl IntoView {
    let options = NOMINATION_POSITIONS
        .iter()
        .map(|(id, title)| view! { <option value=*id>{*title}</option> })
        .collect_view();
    view! {
        <label class="wizard-field">
            "Position"
            <select
                prop:value=move || wizard.with(|w| w.draft.position_id.clone())
                on:change=move |ev| wizard.update(|w| w.draft.position_id = event_target_value(&ev))
            >
                <option value="">"Select a position"</option>
                {options}
            </select>
        </label>
    }
}

fn profile_step(wizard: RwSignal<NominationWizard>, info: RwSignal<String>) -> impl IntoView {
    let on_photo = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(input) = ev
                .target()
                .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let Ok(preview) = web_sys::Url::create_object_url_with_blob(&file) else {
                leptos::logging::warn!("could not preview nomination photo");
                return;
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let size = file.size() as u64;
            let content_type = file.type_();
            let attached = wizard.try_update(|w| w.attach_photo(&content_type, size, preview.clone()));
            match attached {
                Some(Ok(replaced)) => {
                    info.set(String::new());
                    if let Some(old) = replaced {
                        revoke_preview(&old);
                    }
                }
                Some(Err(e)) => {
                    info.set(e.to_string());
                    input.set_value("");
                    revoke_preview(&preview);
                }
                None => revoke_preview(&preview),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (ev, wizard, info);
    };

    view! {
        <label class="wizard-field">
            "Biography"
            <textarea
                rows="4"
                prop:value=move || wizard.with(|w| w.draft.bio.clone())
                on:input=move |ev| wizard.update(|w| w.draft.bio = event_target_value(&ev))
            ></textarea>
        </label>
        <label class="wizard-field">
            "Relevant Experience"
            <textarea
                rows="4"
                prop:value=move || wizard.with(|w| w.draft.experience.clone())
                on:input=move |ev| wizard.update(|w| w.draft.experience = event_target_value(&ev))
            ></textarea>
        </label>
        <label class="wizard-field">
            "Photo (optional, image up to 5MB)"
            <input type="file" accept="image/*" on:change=on_photo/>
        </label>
        <Show when=move || wizard.with(|w| w.draft.photo.is_some())>
            <img
                class="wizard-photo"
                alt="Nomination photo preview"
                src=move || wizard.with(|w| w.draft.photo.clone().unwrap_or_default())
            />
        </Show>
    }
}

fn platform_step(wizard: RwSignal<NominationWizard>) -> impl IntoView {
    view! {
        <label class="wizard-field">
            "Manifesto"
            <textarea
                rows="6"
                prop:value=move || wizard.with(|w| w.draft.manifesto.clone())
                on:input=move |ev| wizard.update(|w| w.draft.manifesto = event_target_value(&ev))
            ></textarea>
        </label>
        <label class="wizard-field">
            "Goals"
            <textarea
                rows="4"
                prop:value=move || wizard.with(|w| w.draft.goals.clone())
                on:input=move |ev| wizard.update(|w| w.draft.goals = event_target_value(&ev))
            ></textarea>
        </label>
    }
}

fn review_step(wizard: RwSignal<NominationWizard>) -> impl IntoView {
    let summary = wizard.with_untracked(|w| match w.step() {
        NominationStep::Review { nomination } => Some(nomination.clone()),
        _ => None,
    });
    let summary = summary.map(|nomination| {
        view! {
            <dl class="wizard-review">
                <dt>"Position"</dt>
                <dd>{nomination.position.title}</dd>
                <dt>"Biography"</dt>
                <dd>{nomination.profile.bio}</dd>
                <dt>"Experience"</dt>
                <dd>{nomination.profile.experience}</dd>
                <dt>"Manifesto"</dt>
                <dd>{nomination.platform.manifesto}</dd>
                <dt>"Goals"</dt>
                <dd>{nomination.platform.goals}</dd>
                <dt>"Photo"</dt>
                <dd>{if nomination.photo.is_some() { "Attached" } else { "None" }}</dd>
            </dl>
        }
    });

    view! {
        {summary}
        <label class="wizard-terms">
            <input
                type="checkbox"
                prop:checked=move || wizard.with(|w| w.draft.terms_accepted)
                on:change=move |ev| wizard.update(|w| w.draft.terms_accepted = event_target_checked(&ev))
            />
            "I confirm the information above is accurate and accept the election rules."
        </label>
    }
}

/// Release an object URL created for a photo preview.
fn revoke_preview(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        let _ = web_sys::Url::revoke_object_url(url);
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = url;
}
