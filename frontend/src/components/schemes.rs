//! 政府补贴计划页
//!
//! 计划列表、详情与资格核查问卷（字段由 `EligibilityForm::FIELDS` 驱动）。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::FileText;
use agromod_shared::protocol::CheckEligibilityRequest;
use agromod_shared::{EligibilityForm, Scheme};

#[component]
pub fn SchemesPage() -> impl IntoView {
    let api = use_api();

    let (schemes, set_schemes) = signal(Vec::<Scheme>::new());
    let (selected, set_selected) = signal(Option::<Scheme>::None);
    let (answers, set_answers) = signal(EligibilityForm::default());
    let (verdict, set_verdict) = signal(Option::<String>::None);
    let (is_checking, set_is_checking) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.schemes().await {
                    Ok(listing) => set_schemes.set(listing.into_vec()),
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
            });
        }
    });

    let on_check = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(scheme) = selected.get_untracked() else {
                return;
            };

            set_is_checking.set(true);
            set_verdict.set(None);

            let request = CheckEligibilityRequest {
                slug: scheme.slug.clone(),
                answers: answers.get_untracked(),
            };

            let api = api.clone();
            spawn_local(async move {
                match api.check_eligibility(&request).await {
                    Ok(response) => set_verdict.set(Some(response.result)),
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
                set_is_checking.set(false);
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-6">
                <div class="flex items-center gap-3">
                    <FileText attr:class="h-8 w-8 text-primary" />
                    <h1 class="text-3xl font-bold">"Government Schemes"</h1>
                </div>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    <div class="space-y-3">
                        <Show when=move || schemes.get().is_empty()>
                            <p class="text-base-content/50 py-8 text-center">
                                "No schemes published yet."
                            </p>
                        </Show>
                        <For
                            each=move || schemes.get()
                            key=|scheme| scheme.id
                            children=move |scheme| {
                                let for_select = scheme.clone();
                                let is_selected = move || {
                                    selected.get().map(|s| s.id) == Some(scheme.id)
                                };
                                view! {
                                    <button
                                        class=move || {
                                            if is_selected() {
                                                "card bg-base-100 shadow-md w-full text-left ring-2 ring-primary"
                                            } else {
                                                "card bg-base-100 shadow-md w-full text-left"
                                            }
                                        }
                                        on:click=move |_| {
                                            set_selected.set(Some(for_select.clone()));
                                            set_verdict.set(None);
                                        }
                                    >
                                        <div class="card-body py-4">
                                            <h3 class="card-title text-base">
                                                {scheme.name.clone()}
                                                <Show when={
                                                    let state = scheme.state.clone();
                                                    move || !state.is_empty()
                                                }>
                                                    <span class="badge badge-ghost">{scheme.state.clone()}</span>
                                                </Show>
                                            </h3>
                                            <p class="text-sm text-base-content/70">
                                                {scheme.short_description.clone()}
                                            </p>
                                        </div>
                                    </button>
                                }
                            }
                        />
                    </div>

                    <div class="card bg-base-100 shadow-xl h-fit">
                        <div class="card-body">
                            <Show
                                when=move || selected.get().is_some()
                                fallback=|| {
                                    view! {
                                        <p class="text-base-content/50 py-8 text-center">
                                            "Select a scheme to check your eligibility."
                                        </p>
                                    }
                                }
                            >
                                {move || {
                                    selected.get().map(|scheme| view! {
                                        <h2 class="card-title">{scheme.name.clone()}</h2>
                                        <p class="text-sm text-base-content/80 whitespace-pre-line">
                                            {scheme.description.clone()}
                                        </p>
                                        <Show when={
                                            let criteria = scheme.eligibility_criteria.clone();
                                            move || !criteria.is_empty()
                                        }>
                                            <div>
                                                <h3 class="font-semibold mt-2">"Eligibility criteria"</h3>
                                                <p class="text-sm text-base-content/70 whitespace-pre-line">
                                                    {scheme.eligibility_criteria.clone()}
                                                </p>
                                            </div>
                                        </Show>
                                    })
                                }}

                                <div class="divider">"Eligibility check"</div>

                                <Show when=move || verdict.get().is_some()>
                                    <div class="alert alert-info">
                                        <span class="whitespace-pre-line">
                                            {move || verdict.get().unwrap_or_default()}
                                        </span>
                                    </div>
                                </Show>

                                <form class="space-y-2" on:submit=on_check.clone()>
                                    {EligibilityForm::FIELDS
                                        .iter()
                                        .map(|(key, label)| {
                                            let key = *key;
                                            view! {
                                                <div class="form-control">
                                                    <label class="label py-1">
                                                        <span class="label-text text-sm">{*label}</span>
                                                    </label>
                                                    <input
                                                        type="text"
                                                        class="input input-bordered input-sm"
                                                        prop:value=move || {
                                                            answers.with(|form| form.get(key).to_string())
                                                        }
                                                        on:input=move |ev| {
                                                            set_answers.update(|form| {
                                                                form.set(key, event_target_value(&ev))
                                                            })
                                                        }
                                                    />
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                    <button
                                        class="btn btn-primary w-full mt-2"
                                        disabled=move || is_checking.get()
                                    >
                                        {move || {
                                            if is_checking.get() { "Checking..." } else { "Check eligibility" }
                                        }}
                                    </button>
                                </form>
                            </Show>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
