//! 行情页
//!
//! 按商品查询实时 mandi 价格、历史均价与短期预测。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::TrendingUp;
use agromod_shared::{MandiPrice, PricePoint};

const COMMODITIES: &[&str] = &[
    "Wheat", "Rice", "Maize", "Cotton", "Sugarcane", "Onion", "Potato", "Tomato",
];

#[component]
pub fn PricesPage() -> impl IntoView {
    let api = use_api();

    let (commodity, set_commodity) = signal("Wheat".to_string());
    let (prices, set_prices) = signal(Vec::<MandiPrice>::new());
    let (history, set_history) = signal(Vec::<PricePoint>::new());
    let (forecast, set_forecast) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 选中商品变化时拉取三类数据
    Effect::new({
        let api = api.clone();
        move |_| {
            let selected = commodity.get();
            set_is_loading.set(true);
            set_error_msg.set(None);
            set_forecast.set(None);

            let api = api.clone();
            spawn_local(async move {
                match api.mandi_prices(&selected).await {
                    Ok(response) => set_prices.set(response.prices),
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
                if let Ok(response) = api.price_history(&selected).await {
                    set_history.set(response.history);
                }
                if let Ok(response) = api.price_predict(&selected).await {
                    let text = response.text();
                    set_forecast.set((!text.is_empty()).then_some(text));
                }
                set_is_loading.set(false);
            });
        }
    });

    // 历史图表的归一化条高（0 价格时不渲染条）
    let max_price = move || {
        history
            .get()
            .iter()
            .map(|p| p.avg_price)
            .fold(0.0f64, f64::max)
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-6">
                <div class="flex items-center justify-between flex-wrap gap-3">
                    <div class="flex items-center gap-3">
                        <TrendingUp attr:class="h-8 w-8 text-primary" />
                        <h1 class="text-3xl font-bold">"Mandi Prices"</h1>
                    </div>
                    <select
                        class="select select-bordered"
                        on:change=move |ev| set_commodity.set(event_target_value(&ev))
                        prop:value=commodity
                    >
                        {COMMODITIES
                            .iter()
                            .map(|name| view! { <option value=*name>{*name}</option> })
                            .collect_view()}
                    </select>
                </div>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show when=move || forecast.get().is_some()>
                    <div class="alert alert-info">
                        <span>
                            <span class="font-semibold">"Forecast: "</span>
                            {move || forecast.get().unwrap_or_default()}
                        </span>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <h2 class="card-title">"Live market prices"</h2>
                            <Show when=move || is_loading.get()>
                                <span class="loading loading-spinner loading-sm"></span>
                            </Show>
                        </div>
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Market"</th>
                                        <th>"State"</th>
                                        <th>"Price"</th>
                                        <th class="hidden md:table-cell">"Date"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || prices.get().is_empty() && !is_loading.get()>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                "No price data for this commodity."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || prices.get().into_iter().enumerate()
                                        key=|(i, _)| *i
                                        children=|(_, row)| {
                                            view! {
                                                <tr>
                                                    <td>{row.market.clone()}</td>
                                                    <td>{row.state.clone()}</td>
                                                    <td class="font-mono">
                                                        {format!("₹{:.0} / {}", row.price, row.unit)}
                                                    </td>
                                                    <td class="hidden md:table-cell opacity-60">
                                                        {row.date.clone()}
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">"Monthly average"</h2>
                        <Show
                            when=move || !history.get().is_empty()
                            fallback=|| {
                                view! {
                                    <p class="text-base-content/50 py-4">"No history available."</p>
                                }
                            }
                        >
                            <div class="flex items-end gap-2 h-40">
                                <For
                                    each=move || history.get()
                                    key=|point| point.month.clone()
                                    children=move |point| {
                                        let month = point.month.clone();
                                        let avg = point.avg_price;
                                        let height = move || {
                                            let max = max_price();
                                            if max > 0.0 {
                                                format!("height: {:.0}%", avg / max * 100.0)
                                            } else {
                                                "height: 0%".to_string()
                                            }
                                        };
                                        view! {
                                            <div class="flex-1 flex flex-col items-center gap-1">
                                                <div
                                                    class="w-full bg-primary/70 rounded-t tooltip"
                                                    attr:data-tip=format!("₹{:.0}", avg)
                                                    style=height
                                                ></div>
                                                <span class="text-xs opacity-60">{month}</span>
                                            </div>
                                        }
                                    }
                                />
                            </div>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
