//! 商户区页面
//!
//! 商户首页（经营概览）、商品管理（新建/部分更新）与订单处理。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::{Package, Plus, TrendingUp};
use agromod_shared::protocol::{
    CreateVendorProductRequest, UpdateVendorProductRequest, VendorProductPatch,
};
use agromod_shared::{Order, Product};

/// 订单状态流转选项
const ORDER_STATUSES: &[&str] = &["pending", "confirmed", "shipped", "delivered", "cancelled"];

#[component]
pub fn VendorDashboardPage() -> impl IntoView {
    let api = use_api();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (orders, set_orders) = signal(Vec::<Order>::new());

    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                if let Ok(listing) = api.vendor_products().await {
                    set_products.set(listing.into_vec());
                }
                if let Ok(listing) = api.vendor_orders().await {
                    set_orders.set(listing.into_vec());
                }
            });
        }
    });

    let active_count = move || products.get().iter().filter(|p| p.is_active).count();
    let pending_count = move || orders.get().iter().filter(|o| o.status == "pending").count();
    let revenue = move || {
        orders
            .get()
            .iter()
            .filter(|o| o.status != "cancelled")
            .filter_map(|o| o.total.parse::<f64>().ok())
            .sum::<f64>()
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-6">
                <h1 class="text-3xl font-bold">"Vendor Dashboard"</h1>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-primary">
                            <Package attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Active products"</div>
                        <div class="stat-value text-primary">{active_count}</div>
                        <div class="stat-desc">
                            {move || format!("{} listed in total", products.get().len())}
                        </div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Pending orders"</div>
                        <div class="stat-value text-warning">{pending_count}</div>
                        <div class="stat-desc">
                            {move || format!("{} orders overall", orders.get().len())}
                        </div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-success">
                            <TrendingUp attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Revenue"</div>
                        <div class="stat-value text-success text-2xl">
                            {move || format!("₹{:.2}", revenue())}
                        </div>
                        <div class="stat-desc">"Excluding cancelled orders"</div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn VendorProductsPage() -> impl IntoView {
    let api = use_api();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (notice, set_notice) = signal(Option::<(String, bool)>::None);

    // 新建商品表单
    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (price, set_price) = signal(String::new());
    let (unit, set_unit) = signal("kg".to_string());
    let (stock, set_stock) = signal(String::new());

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                match api.vendor_products().await {
                    Ok(listing) => set_products.set(listing.into_vec()),
                    Err(e) => set_notice.set(Some((e.message(), true))),
                }
            });
        }
    };

    {
        let load = load.clone();
        Effect::new(move |_| load());
    }

    let on_create = {
        let api = api.clone();
        let load = load.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let Ok(price_value) = price.get_untracked().parse::<f64>() else {
                set_notice.set(Some(("Enter a valid price".to_string(), true)));
                return;
            };

            let request = CreateVendorProductRequest {
                name: name.get_untracked(),
                description: description.get_untracked(),
                price: price_value,
                unit: unit.get_untracked(),
                stock: stock.get_untracked().parse().unwrap_or(0),
                category: None,
                is_active: true,
            };

            let api = api.clone();
            let load = load.clone();
            spawn_local(async move {
                match api.create_vendor_product(&request).await {
                    Ok(_) => {
                        set_name.set(String::new());
                        set_description.set(String::new());
                        set_price.set(String::new());
                        set_stock.set(String::new());
                        set_notice.set(Some(("Product listed".to_string(), false)));
                        load();
                    }
                    Err(e) => set_notice.set(Some((e.message(), true))),
                }
            });
        }
    };

    // 部分更新：只把变化的字段发给服务端
    let toggle_active = {
        let api = api.clone();
        move |product: &Product| {
            let request = UpdateVendorProductRequest {
                id: product.id,
                patch: VendorProductPatch {
                    is_active: Some(!product.is_active),
                    ..Default::default()
                },
            };
            let api = api.clone();
            spawn_local(async move {
                match api.update_vendor_product(&request).await {
                    Ok(updated) => {
                        set_products.update(|list| {
                            if let Some(slot) = list.iter_mut().find(|p| p.id == updated.id) {
                                *slot = updated;
                            }
                        });
                    }
                    Err(e) => set_notice.set(Some((e.message(), true))),
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-6">
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

                <div class="flex items-center gap-3">
                    <Package attr:class="h-8 w-8 text-primary" />
                    <h1 class="text-3xl font-bold">"My Products"</h1>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_create>
                        <h2 class="card-title">
                            <Plus attr:class="h-5 w-5" />
                            "List a new product"
                        </h2>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-2">
                            <input
                                type="text"
                                placeholder="Product name"
                                class="input input-bordered"
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                prop:value=name
                                required
                            />
                            <input
                                type="text"
                                placeholder="Description"
                                class="input input-bordered"
                                on:input=move |ev| set_description.set(event_target_value(&ev))
                                prop:value=description
                            />
                            <input
                                type="number"
                                step="0.01"
                                min="0"
                                placeholder="Price"
                                class="input input-bordered"
                                on:input=move |ev| set_price.set(event_target_value(&ev))
                                prop:value=price
                                required
                            />
                            <div class="join">
                                <input
                                    type="number"
                                    min="0"
                                    placeholder="Stock"
                                    class="input input-bordered join-item flex-1"
                                    on:input=move |ev| set_stock.set(event_target_value(&ev))
                                    prop:value=stock
                                />
                                <select
                                    class="select select-bordered join-item"
                                    on:change=move |ev| set_unit.set(event_target_value(&ev))
                                    prop:value=unit
                                >
                                    <option value="kg">"kg"</option>
                                    <option value="quintal">"quintal"</option>
                                    <option value="litre">"litre"</option>
                                    <option value="piece">"piece"</option>
                                </select>
                            </div>
                        </div>
                        <div class="card-actions justify-end mt-2">
                            <button class="btn btn-primary">"List product"</button>
                        </div>
                    </form>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Product"</th>
                                        <th>"Price"</th>
                                        <th>"Stock"</th>
                                        <th>"Status"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || products.get().is_empty()>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                "No products listed yet."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || products.get()
                                        key=|product| (product.id, product.is_active, product.stock)
                                        children={
                                            let toggle_active = toggle_active.clone();
                                            move |product| {
                                                let toggle_active = toggle_active.clone();
                                                let for_toggle = product.clone();
                                                view! {
                                                    <tr>
                                                        <td class="font-semibold">{product.name.clone()}</td>
                                                        <td class="font-mono">
                                                            {format!("₹{} / {}", product.price, product.unit)}
                                                        </td>
                                                        <td>{product.stock}</td>
                                                        <td>
                                                            <span class=if product.is_active {
                                                                "badge badge-success badge-outline"
                                                            } else {
                                                                "badge badge-ghost"
                                                            }>
                                                                {if product.is_active { "active" } else { "inactive" }}
                                                            </span>
                                                        </td>
                                                        <td>
                                                            <button
                                                                class="btn btn-xs btn-ghost"
                                                                on:click=move |_| toggle_active(&for_toggle)
                                                            >
                                                                {if product.is_active { "Deactivate" } else { "Activate" }}
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn VendorOrdersPage() -> impl IntoView {
    let api = use_api();

    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.vendor_orders().await {
                    Ok(listing) => set_orders.set(listing.into_vec()),
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
            });
        }
    });

    let set_status = {
        let api = api.clone();
        move |id: u64, status: String| {
            let api = api.clone();
            spawn_local(async move {
                match api.update_vendor_order(id, &status).await {
                    Ok(updated) => {
                        set_orders.update(|list| {
                            if let Some(slot) = list.iter_mut().find(|o| o.id == updated.id) {
                                *slot = updated;
                            }
                        });
                    }
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-6">
                <h1 class="text-3xl font-bold">"Orders"</h1>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="space-y-4">
                    <Show when=move || orders.get().is_empty()>
                        <p class="text-base-content/50 py-8 text-center">"No orders yet."</p>
                    </Show>
                    <For
                        each=move || orders.get()
                        key=|order| (order.id, order.status.clone())
                        children={
                            let set_status = set_status.clone();
                            move |order| {
                                let set_status = set_status.clone();
                                let order_id = order.id;
                                let current_status = order.status.clone();
                                view! {
                                    <div class="card bg-base-100 shadow-md">
                                        <div class="card-body">
                                            <div class="flex items-center justify-between flex-wrap gap-2">
                                                <h3 class="card-title text-base">
                                                    {format!("Order #{}", order.id)}
                                                    <span class="badge badge-outline">{order.status.clone()}</span>
                                                </h3>
                                                <div class="flex items-center gap-2">
                                                    <span class="font-mono font-bold">
                                                        {format!("₹{}", order.total)}
                                                    </span>
                                                    <select
                                                        class="select select-bordered select-sm"
                                                        prop:value=current_status.clone()
                                                        on:change=move |ev| {
                                                            set_status(order_id, event_target_value(&ev))
                                                        }
                                                    >
                                                        {ORDER_STATUSES
                                                            .iter()
                                                            .map(|status| {
                                                                view! {
                                                                    <option
                                                                        value=*status
                                                                        selected=*status == current_status
                                                                    >
                                                                        {*status}
                                                                    </option>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </select>
                                                </div>
                                            </div>
                                            <p class="text-sm text-base-content/60">
                                                {format!("Ship to: {}", order.shipping_address)}
                                            </p>
                                            <ul class="text-sm space-y-1">
                                                {order
                                                    .items
                                                    .iter()
                                                    .map(|item| {
                                                        view! {
                                                            <li class="flex justify-between">
                                                                <span>
                                                                    {item.product_name.clone()}
                                                                    <span class="opacity-60">
                                                                        {format!(" × {}", item.quantity)}
                                                                    </span>
                                                                </span>
                                                                <span class="font-mono">{format!("₹{}", item.price)}</span>
                                                            </li>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </ul>
                                        </div>
                                    </div>
                                }
                            }
                        }
                    />
                </div>
            </div>
        </div>
    }
}
