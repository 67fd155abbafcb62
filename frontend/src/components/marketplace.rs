//! 集市页
//!
//! 商品列表、localStorage 购物车与下单。购物车跨会话保留，
//! 下单成功后清空。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::{ShoppingCart, Trash2};
use crate::web::LocalStorage;
use agromod_shared::protocol::{CreateOrderRequest, OrderItemInput};
use agromod_shared::{CART_KEY, CartEntry, Order, Product};

fn load_cart() -> Vec<CartEntry> {
    LocalStorage::get_json(CART_KEY).unwrap_or_default()
}

fn persist_cart(cart: &[CartEntry]) {
    if cart.is_empty() {
        LocalStorage::delete(CART_KEY);
    } else {
        LocalStorage::set_json(CART_KEY, &cart);
    }
}

#[component]
pub fn MarketplacePage() -> impl IntoView {
    let api = use_api();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (cart, set_cart) = signal(load_cart());
    let (shipping_address, set_shipping_address) = signal(String::new());
    let (is_ordering, set_is_ordering) = signal(false);
    let (notice, set_notice) = signal(Option::<(String, bool)>::None);

    let load_orders = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                if let Ok(listing) = api.orders().await {
                    set_orders.set(listing.into_vec());
                }
            });
        }
    };

    {
        let api = api.clone();
        let load_orders = load_orders.clone();
        Effect::new(move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.products().await {
                    Ok(listing) => {
                        set_products
                            .set(listing.into_vec().into_iter().filter(|p| p.is_active).collect());
                    }
                    Err(e) => set_notice.set(Some((e.message(), true))),
                }
            });
            load_orders();
        });
    }

    let add_to_cart = move |product: &Product| {
        set_cart.update(|cart| {
            match cart.iter_mut().find(|entry| entry.product_id == product.id) {
                Some(entry) => entry.quantity += 1,
                None => cart.push(CartEntry {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    price: product.price.clone(),
                    quantity: 1,
                }),
            }
            persist_cart(cart);
        });
    };

    let remove_from_cart = move |product_id: u64| {
        set_cart.update(|cart| {
            cart.retain(|entry| entry.product_id != product_id);
            persist_cart(cart);
        });
    };

    let cart_total = move || cart.get().iter().map(CartEntry::line_total).sum::<f64>();

    let on_checkout = {
        let api = api.clone();
        let load_orders = load_orders.clone();
        move |_| {
            let entries = cart.get_untracked();
            if entries.is_empty() {
                return;
            }
            let address = shipping_address.get_untracked();
            if address.is_empty() {
                set_notice.set(Some(("Enter a shipping address".to_string(), true)));
                return;
            }

            set_is_ordering.set(true);
            let request = CreateOrderRequest {
                shipping_address: address,
                items: entries
                    .iter()
                    .map(|entry| OrderItemInput {
                        product_id: entry.product_id,
                        quantity: entry.quantity,
                    })
                    .collect(),
            };

            let api = api.clone();
            let load_orders = load_orders.clone();
            spawn_local(async move {
                match api.create_order(&request).await {
                    Ok(order) => {
                        set_cart.update(|cart| {
                            cart.clear();
                            persist_cart(cart);
                        });
                        set_notice.set(Some((format!("Order #{} placed", order.id), false)));
                        load_orders();
                    }
                    Err(e) => set_notice.set(Some((e.message(), true))),
                }
                set_is_ordering.set(false);
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-6xl mx-auto space-y-6">
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
                    <ShoppingCart attr:class="h-8 w-8 text-primary" />
                    <h1 class="text-3xl font-bold">"Marketplace"</h1>
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                    <div class="lg:col-span-2 grid grid-cols-1 md:grid-cols-2 gap-4">
                        <Show when=move || products.get().is_empty()>
                            <p class="text-base-content/50 col-span-2 py-8 text-center">
                                "No products available right now."
                            </p>
                        </Show>
                        <For
                            each=move || products.get()
                            key=|product| product.id
                            children=move |product| {
                                let for_cart = product.clone();
                                view! {
                                    <div class="card bg-base-100 shadow-md">
                                        <div class="card-body">
                                            <h3 class="card-title text-base">
                                                {product.name.clone()}
                                                <Show when={
                                                    let name = product.category_name.clone();
                                                    move || !name.is_empty()
                                                }>
                                                    <span class="badge badge-ghost">
                                                        {product.category_name.clone()}
                                                    </span>
                                                </Show>
                                            </h3>
                                            <p class="text-sm text-base-content/70">
                                                {product.description.clone()}
                                            </p>
                                            <div class="flex items-center justify-between mt-2">
                                                <span class="text-lg font-bold text-primary">
                                                    {format!("₹{}", product.price)}
                                                    <span class="text-xs font-normal opacity-60">
                                                        {format!(" / {}", product.unit)}
                                                    </span>
                                                </span>
                                                <button
                                                    class="btn btn-sm btn-primary"
                                                    disabled=product.stock == 0
                                                    on:click=move |_| add_to_cart(&for_cart)
                                                >
                                                    {if product.stock == 0 { "Out of stock" } else { "Add to cart" }}
                                                </button>
                                            </div>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>

                    <div class="space-y-6">
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h2 class="card-title">"Cart"</h2>
                                <Show
                                    when=move || !cart.get().is_empty()
                                    fallback=|| {
                                        view! {
                                            <p class="text-base-content/50 py-2">"Your cart is empty."</p>
                                        }
                                    }
                                >
                                    <ul class="space-y-2">
                                        <For
                                            each=move || cart.get()
                                            key=|entry| (entry.product_id, entry.quantity)
                                            children=move |entry| {
                                                let product_id = entry.product_id;
                                                view! {
                                                    <li class="flex items-center justify-between gap-2">
                                                        <span class="flex-1">
                                                            {entry.product_name.clone()}
                                                            <span class="opacity-60">
                                                                {format!(" × {}", entry.quantity)}
                                                            </span>
                                                        </span>
                                                        <span class="font-mono text-sm">
                                                            {format!("₹{:.2}", entry.line_total())}
                                                        </span>
                                                        <button
                                                            class="btn btn-ghost btn-xs text-error"
                                                            on:click=move |_| remove_from_cart(product_id)
                                                        >
                                                            <Trash2 attr:class="h-4 w-4" />
                                                        </button>
                                                    </li>
                                                }
                                            }
                                        />
                                    </ul>
                                    <div class="divider my-1"></div>
                                    <div class="flex justify-between font-bold">
                                        <span>"Total"</span>
                                        <span>{move || format!("₹{:.2}", cart_total())}</span>
                                    </div>
                                    <textarea
                                        class="textarea textarea-bordered w-full mt-2"
                                        placeholder="Shipping address"
                                        on:input=move |ev| {
                                            set_shipping_address.set(event_target_value(&ev))
                                        }
                                        prop:value=shipping_address
                                    ></textarea>
                                    <button
                                        class="btn btn-primary w-full mt-2"
                                        disabled=move || is_ordering.get()
                                        on:click=on_checkout.clone()
                                    >
                                        {move || if is_ordering.get() { "Placing order..." } else { "Checkout" }}
                                    </button>
                                </Show>
                            </div>
                        </div>

                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h2 class="card-title">"My orders"</h2>
                                <Show when=move || orders.get().is_empty()>
                                    <p class="text-base-content/50 py-2">"No orders yet."</p>
                                </Show>
                                <ul class="space-y-2">
                                    <For
                                        each=move || orders.get()
                                        key=|order| order.id
                                        children=|order| {
                                            view! {
                                                <li class="flex items-center justify-between">
                                                    <span>{format!("Order #{}", order.id)}</span>
                                                    <span class="badge badge-outline">{order.status.clone()}</span>
                                                    <span class="font-mono text-sm">
                                                        {format!("₹{}", order.total)}
                                                    </span>
                                                </li>
                                            }
                                        }
                                    />
                                </ul>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
