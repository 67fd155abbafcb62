//! 顶部导航栏
//!
//! 按会话状态与角色渲染不同菜单；登出后导航由路由守卫自动接管。

use leptos::prelude::*;

use crate::auth::{logout, use_auth, use_session};
use crate::components::icons::{Leaf, LogOut};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use agromod_shared::Role;

/// 农户区菜单项
const FARMER_LINKS: &[(AppRoute, &str)] = &[
    (AppRoute::Dashboard, "Dashboard"),
    (AppRoute::Disease, "Disease Detection"),
    (AppRoute::Yield, "Yield"),
    (AppRoute::Weather, "Weather"),
    (AppRoute::Planner, "Planner"),
    (AppRoute::Marketplace, "Marketplace"),
    (AppRoute::Prices, "Prices"),
    (AppRoute::Schemes, "Schemes"),
];

/// 商户区菜单项
const VENDOR_LINKS: &[(AppRoute, &str)] = &[
    (AppRoute::VendorDashboard, "Dashboard"),
    (AppRoute::VendorProducts, "My Products"),
    (AppRoute::VendorOrders, "Orders"),
];

#[component]
fn NavLink(route: AppRoute, label: &'static str) -> impl IntoView {
    let router = use_router();
    let active = move || router.current_route().get() == route;

    view! {
        <li>
            <a
                class=move || if active() { "active" } else { "" }
                on:click=move |_| router.navigate(route.to_path())
            >
                {label}
            </a>
        </li>
    }
}

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = use_auth();
    let session = use_session();
    let router = use_router();

    let identity = move || auth.state.get().identity;
    let links = move || match identity().map(|user| user.role) {
        Some(Role::Vendor) => VENDOR_LINKS,
        Some(_) => FARMER_LINKS,
        None => &[][..],
    };

    let on_logout = move |_| {
        logout(auth, &session);
        // 守卫 Effect 会把受保护页面重定向到登录页；
        // 公开页面上主动回到首页
        router.navigate(AppRoute::Home.to_path());
    };

    view! {
        <div class="navbar bg-base-100 shadow-md sticky top-0 z-40">
            <div class="flex-1 gap-2">
                <a
                    class="btn btn-ghost text-xl text-primary gap-2"
                    on:click=move |_| router.navigate(AppRoute::Home.to_path())
                >
                    <Leaf attr:class="h-6 w-6" />
                    "Agromod"
                </a>
            </div>
            <div class="flex-none gap-2">
                <ul class="menu menu-horizontal px-1 hidden lg:flex">
                    <For
                        each={move || links().iter().copied().collect::<Vec<_>>()}
                        key={|(route, _)| *route}
                        children={|(route, label)| view! { <NavLink route=route label=label /> }}
                    />
                </ul>
                <Show
                    when=move || identity().is_some()
                    fallback=move || {
                        view! {
                            <button
                                class="btn btn-ghost"
                                on:click=move |_| router.navigate(AppRoute::Login.to_path())
                            >
                                "Log in"
                            </button>
                            <button
                                class="btn btn-primary"
                                on:click=move |_| router.navigate(AppRoute::Register.to_path())
                            >
                                "Sign up"
                            </button>
                        }
                    }
                >
                    <div class="dropdown dropdown-end">
                        <div tabindex="0" role="button" class="btn btn-ghost gap-2">
                            <div class="avatar placeholder">
                                <div class="bg-primary text-primary-content rounded-full w-8">
                                    <span>
                                        {move || {
                                            identity()
                                                .map(|u| u.display_name().chars().take(1).collect::<String>())
                                                .unwrap_or_default()
                                        }}
                                    </span>
                                </div>
                            </div>
                            <span class="hidden md:inline">
                                {move || identity().map(|u| u.display_name()).unwrap_or_default()}
                            </span>
                        </div>
                        <ul
                            tabindex="0"
                            class="dropdown-content z-[1] menu p-2 shadow bg-base-100 rounded-box w-52"
                        >
                            <li>
                                <a on:click=move |_| router.navigate(AppRoute::Profile.to_path())>
                                    "Profile"
                                </a>
                            </li>
                            <Show when=move || matches!(identity().map(|u| u.role), Some(Role::Farmer))>
                                <li>
                                    <a on:click=move |_| {
                                        router.navigate(AppRoute::Notifications.to_path())
                                    }>
                                        "Notifications"
                                    </a>
                                </li>
                            </Show>
                            <li>
                                <a class="text-error" on:click=on_logout.clone()>
                                    <LogOut attr:class="h-4 w-4" />
                                    "Log out"
                                </a>
                            </li>
                        </ul>
                    </div>
                </Show>
            </div>
        </div>
    }
}
