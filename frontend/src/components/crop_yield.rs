//! 产量预测与作物建议

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::Sprout;
use agromod_shared::protocol::{CropSuggestionsRequest, YieldPredictRequest};

#[component]
pub fn YieldPage() -> impl IntoView {
    let api = use_api();

    let (crop, set_crop) = signal(String::new());
    let (region, set_region) = signal(String::new());
    let (season, set_season) = signal("kharif".to_string());
    let (area, set_area) = signal(String::new());

    let (prediction, set_prediction) = signal(Option::<String>::None);
    let (suggestions, set_suggestions) = signal(Option::<String>::None);
    let (is_predicting, set_is_predicting) = signal(false);
    let (is_suggesting, set_is_suggesting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_predict = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            if crop.get().is_empty() || region.get().is_empty() {
                set_error_msg.set(Some("Crop and region are required".to_string()));
                return;
            }

            set_is_predicting.set(true);
            set_error_msg.set(None);

            let request = YieldPredictRequest {
                crop: crop.get_untracked(),
                region: region.get_untracked(),
                season: season.get_untracked(),
                area: area.get_untracked(),
            };

            let api = api.clone();
            spawn_local(async move {
                match api.yield_predict(&request).await {
                    Ok(response) => set_prediction.set(Some(response.prediction)),
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
                set_is_predicting.set(false);
            });
        }
    };

    let on_suggest = {
        let api = api.clone();
        move |_| {
            if region.get().is_empty() {
                set_error_msg.set(Some("Enter a region to get suggestions".to_string()));
                return;
            }

            set_is_suggesting.set(true);
            set_error_msg.set(None);

            let request = CropSuggestionsRequest {
                region: region.get_untracked(),
                season: season.get_untracked(),
                current_crop: crop.get_untracked(),
            };

            let api = api.clone();
            spawn_local(async move {
                match api.crop_suggestions(&request).await {
                    Ok(response) => set_suggestions.set(Some(response.suggestions)),
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
                set_is_suggesting.set(false);
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-3xl mx-auto space-y-6">
                <div class="flex items-center gap-3">
                    <Sprout attr:class="h-8 w-8 text-primary" />
                    <h1 class="text-3xl font-bold">"Yield Prediction"</h1>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_predict>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="grid grid-cols-1 md:grid-cols-2 gap-2">
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Crop"</span></label>
                                <input
                                    type="text"
                                    placeholder="Wheat"
                                    class="input input-bordered"
                                    on:input=move |ev| set_crop.set(event_target_value(&ev))
                                    prop:value=crop
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Region"</span></label>
                                <input
                                    type="text"
                                    placeholder="Punjab"
                                    class="input input-bordered"
                                    on:input=move |ev| set_region.set(event_target_value(&ev))
                                    prop:value=region
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Season"</span></label>
                                <select
                                    class="select select-bordered"
                                    on:change=move |ev| set_season.set(event_target_value(&ev))
                                    prop:value=season
                                >
                                    <option value="kharif">"Kharif"</option>
                                    <option value="rabi">"Rabi"</option>
                                    <option value="zaid">"Zaid"</option>
                                </select>
                            </div>
                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"Area (acres)"</span>
                                </label>
                                <input
                                    type="text"
                                    placeholder="5"
                                    class="input input-bordered"
                                    on:input=move |ev| set_area.set(event_target_value(&ev))
                                    prop:value=area
                                />
                            </div>
                        </div>

                        <div class="flex gap-2 mt-4">
                            <button class="btn btn-primary flex-1" disabled=move || is_predicting.get()>
                                {move || {
                                    if is_predicting.get() { "Predicting..." } else { "Predict yield" }
                                }}
                            </button>
                            <button
                                type="button"
                                class="btn btn-outline flex-1"
                                disabled=move || is_suggesting.get()
                                on:click=on_suggest
                            >
                                {move || {
                                    if is_suggesting.get() {
                                        "Thinking..."
                                    } else {
                                        "Suggest crops"
                                    }
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                <Show when=move || prediction.get().is_some()>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h2 class="card-title">"Predicted yield"</h2>
                            <p class="whitespace-pre-line text-base-content/80">
                                {move || prediction.get().unwrap_or_default()}
                            </p>
                        </div>
                    </div>
                </Show>

                <Show when=move || suggestions.get().is_some()>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h2 class="card-title">"Crop suggestions"</h2>
                            <p class="whitespace-pre-line text-base-content/80">
                                {move || suggestions.get().unwrap_or_default()}
                            </p>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
