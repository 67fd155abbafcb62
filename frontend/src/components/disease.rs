//! 病害识别页
//!
//! 选择作物照片（FileReader 读为 base64）与补充描述，展示诊断结果。

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

use crate::api::use_api;
use crate::components::icons::Microscope;
use agromod_shared::protocol::{DiseaseAnalyzeRequest, DiseaseAnalyzeResponse};

/// FileReader 的 data URL 形如 `data:image/png;base64,XXXX`；
/// 协议体只携带 base64 负载本身。
fn base64_payload(data_url: &str) -> &str {
    match data_url.split_once(";base64,") {
        Some((_, payload)) => payload,
        None => data_url,
    }
}

/// 异步读取所选文件，完成后写入图像与文件名信号
fn read_image_file(
    file: web_sys::File,
    set_image: WriteSignal<String>,
    set_file_name: WriteSignal<String>,
) {
    let Ok(reader) = web_sys::FileReader::new() else {
        return;
    };

    let name = file.name();
    let reader_handle = reader.clone();
    let onloadend = Closure::<dyn FnMut()>::new(move || {
        if let Some(data_url) = reader_handle.result().ok().and_then(|v| v.as_string()) {
            set_image.set(base64_payload(&data_url).to_string());
            set_file_name.set(name.clone());
        }
    });

    reader.set_onloadend(Some(onloadend.as_ref().unchecked_ref()));
    let _ = reader.read_as_data_url(&file);
    // 泄漏闭包以保持回调存活（与 popstate 监听同法）
    onloadend.forget();
}

#[component]
pub fn DiseasePage() -> impl IntoView {
    let api = use_api();

    let (image, set_image) = signal(String::new());
    let (file_name, set_file_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (result, set_result) = signal(Option::<DiseaseAnalyzeResponse>::None);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_file_change = move |ev: leptos::web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        set_image.set(String::new());
        set_file_name.set(String::new());
        read_image_file(file, set_image, set_file_name);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if image.get().is_empty() {
            set_error_msg.set(Some("Select a crop image first".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);
        set_result.set(None);

        let request = DiseaseAnalyzeRequest {
            image: image.get_untracked(),
            description: {
                let text = description.get_untracked();
                (!text.is_empty()).then_some(text)
            },
        };

        let api = api.clone();
        spawn_local(async move {
            match api.analyze_disease(&request).await {
                Ok(response) => set_result.set(Some(response)),
                Err(e) => set_error_msg.set(Some(e.message())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-3xl mx-auto space-y-6">
                <div class="flex items-center gap-3">
                    <Microscope attr:class="h-8 w-8 text-primary" />
                    <h1 class="text-3xl font-bold">"Disease Detection"</h1>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Crop image (JPEG/PNG)"</span>
                            </label>
                            <input
                                type="file"
                                accept="image/jpeg,image/png"
                                class="file-input file-input-bordered"
                                on:change=on_file_change
                            />
                            <Show when=move || !file_name.get().is_empty()>
                                <span class="label-text-alt mt-1 opacity-70">
                                    {move || format!("Selected: {}", file_name.get())}
                                </span>
                            </Show>
                        </div>
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Describe the symptoms (optional)"</span>
                            </label>
                            <textarea
                                class="textarea textarea-bordered"
                                placeholder="Yellow spots on the lower leaves..."
                                on:input=move |ev| set_description.set(event_target_value(&ev))
                                prop:value=description
                            ></textarea>
                        </div>
                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || {
                                    if is_submitting.get() {
                                        view! {
                                            <span class="loading loading-spinner"></span>
                                            "Analyzing..."
                                        }
                                            .into_any()
                                    } else {
                                        "Analyze".into_any()
                                    }
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                <Show when=move || result.get().is_some()>
                    {move || {
                        let diagnosis = result.get().unwrap_or_default();
                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body space-y-2">
                                    <h2 class="card-title">
                                        {diagnosis.disease.clone().unwrap_or_else(|| "No disease identified".to_string())}
                                        {diagnosis
                                            .confidence
                                            .map(|c| {
                                                view! {
                                                    <span class="badge badge-primary">
                                                        {format!("{:.0}% confidence", c * 100.0)}
                                                    </span>
                                                }
                                            })}
                                    </h2>
                                    {diagnosis
                                        .description
                                        .clone()
                                        .map(|text| view! { <p class="text-base-content/80">{text}</p> })}
                                    {diagnosis
                                        .treatment
                                        .clone()
                                        .map(|text| {
                                            view! {
                                                <div>
                                                    <h3 class="font-semibold">"Recommended treatment"</h3>
                                                    <p class="text-base-content/80 whitespace-pre-line">{text}</p>
                                                </div>
                                            }
                                        })}
                                </div>
                            </div>
                        }
                    }}
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::base64_payload;

    #[test]
    fn data_url_prefix_is_stripped() {
        assert_eq!(
            base64_payload("data:image/png;base64,iVBORw0KGgo="),
            "iVBORw0KGgo="
        );
        assert_eq!(base64_payload("data:image/jpeg;base64,/9j/4AAQ"), "/9j/4AAQ");
    }

    #[test]
    fn bare_payload_passes_through() {
        assert_eq!(base64_payload("iVBORw0KGgo="), "iVBORw0KGgo=");
    }
}
