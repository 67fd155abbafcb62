//! 农户首页
//!
//! 聚合天气快照、未读告警数与功能入口。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::icons::*;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use agromod_shared::protocol::CurrentWeatherResponse;

#[component]
fn QuickLink(route: AppRoute, title: &'static str, children: Children) -> impl IntoView {
    let router = use_router();
    view! {
        <button
            class="card bg-base-100 shadow-md hover:shadow-xl transition-shadow text-left"
            on:click=move |_| router.navigate(route.to_path())
        >
            <div class="card-body flex-row items-center gap-4">
                <div class="p-3 bg-primary/10 rounded-2xl text-primary">{children()}</div>
                <h3 class="card-title text-base">{title}</h3>
            </div>
        </button>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let (weather, set_weather) = signal(Option::<CurrentWeatherResponse>::None);
    let (unread_alerts, set_unread_alerts) = signal(0usize);

    // 初始加载：天气快照与未读告警数；失败只降级展示，不打断页面
    Effect::new({
        let api = api.clone();
        move |_| {
            let weather_api = api.clone();
            spawn_local(async move {
                if let Ok(snapshot) = weather_api.current_weather().await {
                    set_weather.set(Some(snapshot));
                }
            });
            let alerts_api = api.clone();
            spawn_local(async move {
                if let Ok(response) = alerts_api.weather_alerts().await {
                    set_unread_alerts
                        .set(response.alerts.iter().filter(|a| !a.is_read).count());
                }
            });
        }
    });

    let greeting = move || {
        auth.state
            .get()
            .identity
            .map(|user| format!("Welcome back, {}", user.display_name()))
            .unwrap_or_default()
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-6">
                <h1 class="text-3xl font-bold">{greeting}</h1>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-primary">
                            <CloudSun attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Current weather"</div>
                        <div class="stat-value text-primary text-2xl">
                            {move || {
                                weather
                                    .get()
                                    .and_then(|w| w.current.temperature)
                                    .map(|t| format!("{:.0}°C", t))
                                    .unwrap_or_else(|| "--".to_string())
                            }}
                        </div>
                        <div class="stat-desc">
                            {move || {
                                weather.get().map(|w| w.location_name).unwrap_or_default()
                            }}
                        </div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-warning">
                            <Bell attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Unread alerts"</div>
                        <div class="stat-value text-warning">{unread_alerts}</div>
                        <div class="stat-desc">"Weather warnings for your region"</div>
                    </div>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                    <QuickLink route=AppRoute::Disease title="Disease Detection">
                        <Microscope attr:class="h-6 w-6" />
                    </QuickLink>
                    <QuickLink route=AppRoute::Yield title="Yield Prediction">
                        <Sprout attr:class="h-6 w-6" />
                    </QuickLink>
                    <QuickLink route=AppRoute::Weather title="Weather">
                        <CloudSun attr:class="h-6 w-6" />
                    </QuickLink>
                    <QuickLink route=AppRoute::Planner title="Crop Planner">
                        <Calendar attr:class="h-6 w-6" />
                    </QuickLink>
                    <QuickLink route=AppRoute::Marketplace title="Marketplace">
                        <ShoppingCart attr:class="h-6 w-6" />
                    </QuickLink>
                    <QuickLink route=AppRoute::Prices title="Mandi Prices">
                        <TrendingUp attr:class="h-6 w-6" />
                    </QuickLink>
                    <QuickLink route=AppRoute::Schemes title="Government Schemes">
                        <FileText attr:class="h-6 w-6" />
                    </QuickLink>
                    <QuickLink route=AppRoute::Profile title="My Profile">
                        <User attr:class="h-6 w-6" />
                    </QuickLink>
                </div>
            </div>
        </div>
    }
}
