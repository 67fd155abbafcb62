//! 天气页
//!
//! 当前天气、告警列表（可标记已读）与位置/告警偏好设置。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::{AlertTriangle, CloudSun, RefreshCw};
use agromod_shared::protocol::CurrentWeatherResponse;
use agromod_shared::{GeocodeResult, WeatherAlert, WeatherPreferences};

#[component]
fn StatCell(label: &'static str, value: Memo<String>) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-title">{label}</div>
            <div class="stat-value text-2xl">{value}</div>
        </div>
    }
}

fn fmt(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{:.1}{}", v, unit))
        .unwrap_or_else(|| "--".to_string())
}

#[component]
pub fn WeatherPage() -> impl IntoView {
    let api = use_api();

    let (snapshot, set_snapshot) = signal(Option::<CurrentWeatherResponse>::None);
    let (alerts, set_alerts) = signal(Vec::<WeatherAlert>::new());
    let (prefs, set_prefs) = signal(WeatherPreferences::default());
    let (search, set_search) = signal(String::new());
    let (candidates, set_candidates) = signal(Vec::<GeocodeResult>::new());
    let (loading, set_loading) = signal(true);
    let (notice, set_notice) = signal(Option::<(String, bool)>::None);

    let load = {
        let api = api.clone();
        move || {
            set_loading.set(true);
            let api = api.clone();
            spawn_local(async move {
                match api.current_weather().await {
                    Ok(data) => set_snapshot.set(Some(data)),
                    Err(e) => set_notice.set(Some((e.message(), true))),
                }
                if let Ok(response) = api.weather_alerts().await {
                    let mut merged = response.alerts;
                    merged.extend(response.live);
                    set_alerts.set(merged);
                }
                if let Ok(preferences) = api.weather_preferences().await {
                    set_prefs.set(preferences);
                }
                set_loading.set(false);
            });
        }
    };

    // 初始加载
    {
        let load = load.clone();
        Effect::new(move |_| load());
    }

    let mark_all_read = {
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

    let on_search = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let query = search.get_untracked();
            if query.is_empty() {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match api.geocode(&query).await {
                    Ok(response) => set_candidates.set(response.results),
                    Err(e) => set_notice.set(Some((e.message(), true))),
                }
            });
        }
    };

    let save_prefs = {
        let api = api.clone();
        let load = load.clone();
        move |_| {
            let api = api.clone();
            let load = load.clone();
            spawn_local(async move {
                match api.save_weather_preferences(prefs.get_untracked()).await {
                    Ok(saved) => {
                        set_prefs.set(saved);
                        set_notice.set(Some(("Preferences saved".to_string(), false)));
                        load();
                    }
                    Err(e) => set_notice.set(Some((e.message(), true))),
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-4xl mx-auto space-y-6">
                <Show when=move || notice.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class=move || {
                            if notice.get().map(|(_, is_err)| is_err).unwrap_or(false) {
                                "alert alert-error shadow-lg"
                            } else {
                                "alert alert-success shadow-lg"
                            }
                        }>
                            <span>{move || notice.get().map(|(text, _)| text).unwrap_or_default()}</span>
                        </div>
                    </div>
                </Show>

                <div class="flex items-center justify-between">
                    <div class="flex items-center gap-3">
                        <CloudSun attr:class="h-8 w-8 text-primary" />
                        <h1 class="text-3xl font-bold">
                            "Weather"
                            <span class="text-base font-normal text-base-content/60 ml-2">
                                {move || {
                                    snapshot.get().map(|s| s.location_name).unwrap_or_default()
                                }}
                            </span>
                        </h1>
                    </div>
                    <button
                        class="btn btn-ghost btn-circle"
                        disabled=move || loading.get()
                        on:click={
                            let load = load.clone();
                            move |_| load()
                        }
                    >
                        <RefreshCw attr:class=move || {
                            if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                        } />
                    </button>
                </div>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <StatCell
                        label="Temperature"
                        value=Memo::new(move |_| {
                            fmt(snapshot.get().and_then(|s| s.current.temperature), "°C")
                        })
                    />
                    <StatCell
                        label="Precipitation"
                        value=Memo::new(move |_| {
                            fmt(snapshot.get().and_then(|s| s.current.precipitation), " mm")
                        })
                    />
                    <StatCell
                        label="Wind"
                        value=Memo::new(move |_| {
                            fmt(snapshot.get().and_then(|s| s.current.wind_speed), " km/h")
                        })
                    />
                    <StatCell
                        label="Humidity"
                        value=Memo::new(move |_| {
                            fmt(snapshot.get().and_then(|s| s.current.humidity), "%")
                        })
                    />
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex items-center justify-between">
                            <h2 class="card-title">
                                <AlertTriangle attr:class="h-5 w-5 text-warning" />
                                "Alerts"
                            </h2>
                            <button class="btn btn-sm btn-ghost" on:click=mark_all_read>
                                "Mark all read"
                            </button>
                        </div>
                        <Show
                            when=move || !alerts.get().is_empty()
                            fallback=|| {
                                view! {
                                    <p class="text-base-content/50 py-4">"No active alerts."</p>
                                }
                            }
                        >
                            <ul class="space-y-2">
                                <For
                                    each=move || alerts.get().into_iter().enumerate()
                                    key=|(i, alert)| (alert.id, *i)
                                    children=|(_, alert)| {
                                        view! {
                                            <li class=if alert.is_read {
                                                "p-3 rounded-lg bg-base-200 opacity-60"
                                            } else {
                                                "p-3 rounded-lg bg-warning/10 border border-warning/30"
                                            }>
                                                <span class="badge badge-warning badge-outline mr-2">
                                                    {alert.alert_type.clone()}
                                                </span>
                                                {alert.message.clone()}
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </Show>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body space-y-2">
                        <h2 class="card-title">"Location & alert preferences"</h2>

                        <form class="join w-full" on:submit=on_search>
                            <input
                                type="text"
                                placeholder="Search for a town or district..."
                                class="input input-bordered join-item flex-1"
                                on:input=move |ev| set_search.set(event_target_value(&ev))
                                prop:value=search
                            />
                            <button class="btn btn-primary join-item">"Search"</button>
                        </form>

                        <Show when=move || !candidates.get().is_empty()>
                            <ul class="menu bg-base-200 rounded-box">
                                <For
                                    each=move || candidates.get()
                                    key=|c| (c.name.clone(), c.latitude.to_bits(), c.longitude.to_bits())
                                    children=move |candidate| {
                                        let label = match (&candidate.state, &candidate.country) {
                                            (Some(state), _) => format!("{}, {}", candidate.name, state),
                                            (None, Some(country)) => {
                                                format!("{}, {}", candidate.name, country)
                                            }
                                            _ => candidate.name.clone(),
                                        };
                                        view! {
                                            <li>
                                                <a on:click=move |_| {
                                                    set_prefs.update(|p| {
                                                        p.latitude = Some(candidate.latitude);
                                                        p.longitude = Some(candidate.longitude);
                                                        p.location_name = candidate.name.clone();
                                                    });
                                                    set_candidates.set(Vec::new());
                                                }>{label.clone()}</a>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </Show>

                        <p class="text-sm text-base-content/70">
                            "Current location: "
                            {move || {
                                let p = prefs.get();
                                if p.location_name.is_empty() {
                                    "not set".to_string()
                                } else {
                                    p.location_name
                                }
                            }}
                        </p>

                        <div class="form-control">
                            <label class="label cursor-pointer justify-start gap-3">
                                <input
                                    type="checkbox"
                                    class="toggle toggle-primary"
                                    prop:checked=move || prefs.get().email_alerts
                                    on:change=move |ev| {
                                        set_prefs.update(|p| p.email_alerts = event_target_checked(&ev))
                                    }
                                />
                                <span class="label-text">"Email alerts"</span>
                            </label>
                            <label class="label cursor-pointer justify-start gap-3">
                                <input
                                    type="checkbox"
                                    class="toggle"
                                    prop:checked=move || prefs.get().alert_frost
                                    on:change=move |ev| {
                                        set_prefs.update(|p| p.alert_frost = event_target_checked(&ev))
                                    }
                                />
                                <span class="label-text">"Frost warnings"</span>
                            </label>
                            <label class="label cursor-pointer justify-start gap-3">
                                <input
                                    type="checkbox"
                                    class="toggle"
                                    prop:checked=move || prefs.get().alert_heavy_rain
                                    on:change=move |ev| {
                                        set_prefs
                                            .update(|p| p.alert_heavy_rain = event_target_checked(&ev))
                                    }
                                />
                                <span class="label-text">"Heavy rain warnings"</span>
                            </label>
                            <label class="label cursor-pointer justify-start gap-3">
                                <input
                                    type="checkbox"
                                    class="toggle"
                                    prop:checked=move || prefs.get().alert_heat
                                    on:change=move |ev| {
                                        set_prefs.update(|p| p.alert_heat = event_target_checked(&ev))
                                    }
                                />
                                <span class="label-text">"Heat wave warnings"</span>
                            </label>
                        </div>

                        <div class="card-actions justify-end">
                            <button class="btn btn-primary" on:click=save_prefs>
                                "Save preferences"
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
