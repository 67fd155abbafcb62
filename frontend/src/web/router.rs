//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 守卫判定本身是 `route::decide` 纯函数；本模块负责在导航、
//! 浏览器前进/后退、以及会话状态变化三个时机应用它。

use agromod_shared::Role;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::log::console_log;
use super::route::{AppRoute, GuardDecision, decide};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 会话状态以注入信号的形式接入，与认证系统解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话是否仍在解析（注入）
    is_resolving: Signal<bool>,
    /// 当前角色，未登录为 None（注入）
    role: Signal<Option<Role>>,
}

impl RouterService {
    fn new(is_resolving: Signal<bool>, role: Signal<Option<Role>>) -> Self {
        // 初始路由从 URL 解析；守卫由 Effect 在会话解析完成后应用
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_resolving,
            role,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn is_resolving(&self) -> Signal<bool> {
        self.is_resolving
    }

    pub fn role(&self) -> Signal<Option<Role>> {
        self.role
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        let resolving = self.is_resolving.get_untracked();
        let role = self.role.get_untracked();

        let destination = match decide(resolving, role, target.requirement()) {
            GuardDecision::Redirect(redirect) => {
                console_log(&format!(
                    "[Router] Access denied for {}. Redirecting to {}.",
                    target, redirect
                ));
                redirect
            }
            // Wait 时仍然记录目标路由；出口组件会等待会话解析，
            // 守卫 Effect 在解析完成后重新判定
            GuardDecision::Wait | GuardDecision::Render => target,
        };

        if use_push {
            push_history_state(destination.to_path());
        } else {
            replace_history_state(destination.to_path());
        }
        self.set_route.set(destination);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_resolving = self.is_resolving;
        let role = self.role;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());

            // popstate 时也执行守卫逻辑
            match decide(
                is_resolving.get_untracked(),
                role.get_untracked(),
                target.requirement(),
            ) {
                GuardDecision::Redirect(redirect) => {
                    replace_history_state(redirect.to_path());
                    set_route.set(redirect);
                }
                GuardDecision::Wait | GuardDecision::Render => set_route.set(target),
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话状态变化时重新应用守卫
    ///
    /// 覆盖三种场景：启动时解析完成、登出/会话过期、角色变化。
    fn setup_session_guard(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_resolving = self.is_resolving;
        let role = self.role;

        Effect::new(move |_| {
            let resolving = is_resolving.get();
            let role = role.get();
            let route = current_route.get();

            if let GuardDecision::Redirect(redirect) = decide(resolving, role, route.requirement())
            {
                console_log(&format!(
                    "[Router] Session changed on {}. Redirecting to {}.",
                    route, redirect
                ));
                replace_history_state(redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_resolving: Signal<bool>, role: Signal<Option<Role>>) -> RouterService {
    let router = RouterService::new(is_resolving, role);

    router.init_popstate_listener();
    router.setup_session_guard();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话解析中信号
    is_resolving: Signal<bool>,
    /// 当前角色信号
    role: Signal<Option<Role>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_resolving, role);

    children()
}

/// 路由出口组件
///
/// 根据当前路由与守卫判定渲染对应的组件。
/// 会话解析期间渲染加载指示，不渲染任何受保护内容。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let route = router.current_route().get();
        match decide(
            router.is_resolving().get(),
            router.role().get(),
            route.requirement(),
        ) {
            GuardDecision::Render => matcher(route),
            GuardDecision::Wait => view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any(),
            // 重定向由守卫 Effect 完成，这里渲染空视图避免闪烁
            GuardDecision::Redirect(_) => ().into_any(),
        }
    }
}
