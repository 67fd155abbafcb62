//! Agromod 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `session`: 凭据存储、统一请求通道与会话状态机
//! - `web::route`: 路由定义（领域模型，含角色守卫判定）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态到信号的桥接
//! - `api`: 功能端点门面
//! - `components`: UI 组件层

use std::sync::Arc;

mod api;
mod auth;
mod components {
    pub mod crop_yield;
    pub mod dashboard;
    pub mod disease;
    pub mod home;
    mod icons;
    pub mod login;
    pub mod marketplace;
    pub mod navbar;
    pub mod notifications;
    pub mod password;
    pub mod planner;
    pub mod prices;
    pub mod profile;
    pub mod register;
    pub mod schemes;
    pub mod vendor;
    pub mod weather;
}
mod session;

use crate::api::AgromodApi;
use crate::auth::{AppSession, AuthContext, SessionHandle, init_auth};
use crate::components::crop_yield::YieldPage;
use crate::components::dashboard::DashboardPage;
use crate::components::disease::DiseasePage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::marketplace::MarketplacePage;
use crate::components::navbar::NavBar;
use crate::components::notifications::NotificationsPage;
use crate::components::password::{ForgotPasswordPage, ResetPasswordPage};
use crate::components::planner::PlannerPage;
use crate::components::prices::PricesPage;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::schemes::SchemesPage;
use crate::components::vendor::{VendorDashboardPage, VendorOrdersPage, VendorProductsPage};
use crate::components::weather::WeatherPage;
use crate::session::{BrowserTokenStore, FetchTransport, SessionClient, SessionProvider};

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    mod log;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::{HttpClient, HttpError};
    pub use log::{console_log, console_warn};
    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::ResetPassword => view! { <ResetPasswordPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Disease => view! { <DiseasePage /> }.into_any(),
        AppRoute::Yield => view! { <YieldPage /> }.into_any(),
        AppRoute::Weather => view! { <WeatherPage /> }.into_any(),
        AppRoute::Planner => view! { <PlannerPage /> }.into_any(),
        AppRoute::Marketplace => view! { <MarketplacePage /> }.into_any(),
        AppRoute::Schemes => view! { <SchemesPage /> }.into_any(),
        AppRoute::Prices => view! { <PricesPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Notifications => view! { <NotificationsPage /> }.into_any(),
        AppRoute::VendorDashboard => view! { <VendorDashboardPage /> }.into_any(),
        AppRoute::VendorProducts => view! { <VendorProductsPage /> }.into_any(),
        AppRoute::VendorOrders => view! { <VendorOrdersPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建会话栈：同一个客户端被会话提供者与 API 门面共享
    let client = Arc::new(SessionClient::new(
        "",
        Arc::new(BrowserTokenStore),
        FetchTransport,
    ));
    let session: Arc<AppSession> = Arc::new(SessionProvider::new(client.clone()));

    provide_context(SessionHandle(session.clone()));
    provide_context(AgromodApi::new(client));

    // 2. 创建认证上下文并启动会话解析
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(auth_ctx, session);

    // 3. 把会话信号注入路由服务（解耦！）
    let is_resolving = auth_ctx.is_resolving_signal();
    let role = auth_ctx.role_signal();

    view! {
        // 4. 路由器组件：注入会话信号实现守卫
        <Router is_resolving=is_resolving role=role>
            <NavBar />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
