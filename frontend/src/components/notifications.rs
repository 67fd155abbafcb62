//! 通知中心
//!
//! 展示持久化的天气告警，支持逐条与批量标记已读。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::Bell;
use agromod_shared::WeatherAlert;

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let api = use_api();

    let (alerts, set_alerts) = signal(Vec::<WeatherAlert>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.weather_alerts().await {
                    Ok(response) => set_alerts.set(response.alerts),
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
                set_is_loading.set(false);
            });
        }
    });

    let mark_read = {
        let api = api.clone();
        move |id: u64| {
            let api = api.clone();
            spawn_local(async move {
                if api.mark_alerts_read(vec![id]).await.is_ok() {
                    set_alerts.update(|list| {
                        for alert in list.iter_mut().filter(|a| a.id == Some(id)) {
                            alert.is_read = true;
                        }
                    });
                }
            });
        }
    };

    let mark_all = {
        let api = api.clone();
        move |_| {
            let ids: Vec<u64> = alerts
                .get_untracked()
                .iter()
                .filter(|a| !a.is_read)
                .filter_map(|a| a.id)
                .collect();
            if ids.is_empty() {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                if api.mark_alerts_read(ids).await.is_ok() {
                    set_alerts.update(|list| {
                        for alert in list.iter_mut() {
                            alert.is_read = true;
                        }
                    });
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-3xl mx-auto space-y-6">
                <div class="flex items-center justify-between">
                    <div class="flex items-center gap-3">
                        <Bell attr:class="h-8 w-8 text-primary" />
                        <h1 class="text-3xl font-bold">"Notifications"</h1>
                    </div>
                    <button class="btn btn-sm btn-ghost" on:click=mark_all>
                        "Mark all read"
                    </button>
                </div>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <Show when=move || is_loading.get()>
                            <div class="text-center py-8">
                                <span class="loading loading-spinner loading-md"></span>
                            </div>
                        </Show>
                        <Show when=move || !is_loading.get() && alerts.get().is_empty()>
                            <p class="text-base-content/50 py-8 text-center">
                                "You are all caught up."
                            </p>
                        </Show>
                        <ul class="space-y-2">
                            <For
                                each=move || alerts.get()
                                key=|alert| (alert.id, alert.is_read)
                                children={
                                    let mark_read = mark_read.clone();
                                    move |alert| {
                                        let mark_read = mark_read.clone();
                                        let id = alert.id;
                                        view! {
                                            <li class=if alert.is_read {
                                                "p-4 rounded-lg bg-base-200 opacity-60 flex justify-between items-center"
                                            } else {
                                                "p-4 rounded-lg bg-warning/10 border border-warning/30 flex justify-between items-center"
                                            }>
                                                <div>
                                                    <span class="badge badge-warning badge-outline mr-2">
                                                        {alert.alert_type.clone()}
                                                    </span>
                                                    {alert.message.clone()}
                                                </div>
                                                <Show when=move || !alert.is_read && id.is_some()>
                                                    <button
                                                        class="btn btn-xs btn-ghost"
                                                        on:click={
                                                            let mark_read = mark_read.clone();
                                                            move |_| {
                                                                if let Some(id) = id {
                                                                    mark_read(id);
                                                                }
                                                            }
                                                        }
                                                    >
                                                        "Mark read"
                                                    </button>
                                                </Show>
                                            </li>
                                        }
                                    }
                                }
                            />
                        </ul>
                    </div>
                </div>
            </div>
        </div>
    }
}
