//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义应用的所有路由、每个路由的角色要求，以及核心守卫判定函数。

use agromod_shared::Role;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 公开首页（默认路由）
    #[default]
    Home,
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    /// 农户首页（农户区默认落点）
    Dashboard,
    Disease,
    Yield,
    Weather,
    Planner,
    Marketplace,
    Schemes,
    Prices,
    Profile,
    Notifications,
    /// 商户首页（商户区默认落点）
    VendorDashboard,
    VendorProducts,
    VendorOrders,
    /// 页面未找到
    NotFound,
}

/// 路由的静态访问要求，应用启动时即固定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRequirement {
    /// 无需登录
    Public,
    /// 任意已登录身份（农户区；商户将被引导回商户区）
    Authenticated,
    /// 仅商户
    VendorOnly,
}

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话仍在解析，暂不渲染，待解析完成后重新判定
    Wait,
    /// 允许渲染
    Render,
    /// 重定向到指定路由
    Redirect(AppRoute),
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/forgot-password" => Self::ForgotPassword,
            "/reset-password" => Self::ResetPassword,
            "/dashboard" => Self::Dashboard,
            "/disease" => Self::Disease,
            "/yield" => Self::Yield,
            "/weather" => Self::Weather,
            "/planner" => Self::Planner,
            "/marketplace" => Self::Marketplace,
            "/schemes" => Self::Schemes,
            "/prices" => Self::Prices,
            "/profile" => Self::Profile,
            "/notifications" => Self::Notifications,
            "/vendor/dashboard" => Self::VendorDashboard,
            "/vendor/products" => Self::VendorProducts,
            "/vendor/orders" => Self::VendorOrders,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::ForgotPassword => "/forgot-password",
            Self::ResetPassword => "/reset-password",
            Self::Dashboard => "/dashboard",
            Self::Disease => "/disease",
            Self::Yield => "/yield",
            Self::Weather => "/weather",
            Self::Planner => "/planner",
            Self::Marketplace => "/marketplace",
            Self::Schemes => "/schemes",
            Self::Prices => "/prices",
            Self::Profile => "/profile",
            Self::Notifications => "/notifications",
            Self::VendorDashboard => "/vendor/dashboard",
            Self::VendorProducts => "/vendor/products",
            Self::VendorOrders => "/vendor/orders",
            Self::NotFound => "/404",
        }
    }

    /// 每个路由的静态访问要求
    pub fn requirement(&self) -> RouteRequirement {
        match self {
            Self::Home
            | Self::Login
            | Self::Register
            | Self::ForgotPassword
            | Self::ResetPassword
            | Self::NotFound => RouteRequirement::Public,
            Self::VendorDashboard | Self::VendorProducts | Self::VendorOrders => {
                RouteRequirement::VendorOnly
            }
            _ => RouteRequirement::Authenticated,
        }
    }

    /// 未登录访问受保护路由时的重定向目标
    pub fn login_redirect() -> Self {
        Self::Login
    }

    /// 农户区默认落点
    pub fn farmer_landing() -> Self {
        Self::Dashboard
    }

    /// 商户区默认落点
    pub fn vendor_landing() -> Self {
        Self::VendorDashboard
    }

    /// 按角色返回登录后的默认落点
    pub fn landing_for(role: Role) -> Self {
        if role.is_vendor() {
            Self::vendor_landing()
        } else {
            Self::farmer_landing()
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// **核心守卫逻辑**
///
/// 纯函数：`(是否解析中, 当前角色, 路由要求) -> 判定`。
/// 判定顺序：
/// 1. 会话解析中 -> 暂停渲染
/// 2. 公开路由 -> 渲染
/// 3. 未登录 -> 重定向登录页
/// 4. 仅商户路由 + 非商户 -> 重定向农户首页
/// 5. 农户区路由 + 商户身份 -> 重定向商户首页（商户被限制在商户区）
/// 6. 其余 -> 渲染
pub fn decide(resolving: bool, role: Option<Role>, requirement: RouteRequirement) -> GuardDecision {
    if resolving {
        return GuardDecision::Wait;
    }
    match (requirement, role) {
        (RouteRequirement::Public, _) => GuardDecision::Render,
        (_, None) => GuardDecision::Redirect(AppRoute::login_redirect()),
        (RouteRequirement::VendorOnly, Some(role)) if !role.is_vendor() => {
            GuardDecision::Redirect(AppRoute::farmer_landing())
        }
        (RouteRequirement::Authenticated, Some(Role::Vendor)) => {
            GuardDecision::Redirect(AppRoute::vendor_landing())
        }
        _ => GuardDecision::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FARMER_VIEWS: &[AppRoute] = &[
        AppRoute::Dashboard,
        AppRoute::Disease,
        AppRoute::Yield,
        AppRoute::Weather,
        AppRoute::Planner,
        AppRoute::Marketplace,
        AppRoute::Schemes,
        AppRoute::Prices,
        AppRoute::Profile,
        AppRoute::Notifications,
    ];

    const VENDOR_VIEWS: &[AppRoute] = &[
        AppRoute::VendorDashboard,
        AppRoute::VendorProducts,
        AppRoute::VendorOrders,
    ];

    #[test]
    fn resolving_always_waits() {
        for route in FARMER_VIEWS.iter().chain(VENDOR_VIEWS) {
            assert_eq!(
                decide(true, None, route.requirement()),
                GuardDecision::Wait
            );
            assert_eq!(
                decide(true, Some(Role::Vendor), route.requirement()),
                GuardDecision::Wait
            );
        }
    }

    #[test]
    fn public_routes_render_for_everyone() {
        for role in [None, Some(Role::Farmer), Some(Role::Vendor)] {
            assert_eq!(
                decide(false, role, AppRoute::Home.requirement()),
                GuardDecision::Render
            );
            assert_eq!(
                decide(false, role, AppRoute::Login.requirement()),
                GuardDecision::Render
            );
        }
    }

    #[test]
    fn anonymous_is_always_sent_to_login() {
        // Property: absent identity + any non-public requirement -> login redirect
        for route in FARMER_VIEWS.iter().chain(VENDOR_VIEWS) {
            assert_eq!(
                decide(false, None, route.requirement()),
                GuardDecision::Redirect(AppRoute::Login)
            );
        }
    }

    #[test]
    fn vendors_never_render_farmer_views() {
        for route in FARMER_VIEWS {
            assert_eq!(
                decide(false, Some(Role::Vendor), route.requirement()),
                GuardDecision::Redirect(AppRoute::VendorDashboard)
            );
        }
    }

    #[test]
    fn farmers_never_render_vendor_views() {
        for route in VENDOR_VIEWS {
            assert_eq!(
                decide(false, Some(Role::Farmer), route.requirement()),
                GuardDecision::Redirect(AppRoute::Dashboard)
            );
        }
    }

    #[test]
    fn matching_roles_render() {
        assert_eq!(
            decide(false, Some(Role::Farmer), RouteRequirement::Authenticated),
            GuardDecision::Render
        );
        assert_eq!(
            decide(false, Some(Role::Vendor), RouteRequirement::VendorOnly),
            GuardDecision::Render
        );
    }

    #[test]
    fn paths_round_trip() {
        for route in FARMER_VIEWS.iter().chain(VENDOR_VIEWS) {
            assert_eq!(AppRoute::from_path(route.to_path()), *route);
        }
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/weather/"), AppRoute::Weather);
        assert_eq!(AppRoute::from_path("/no-such-page"), AppRoute::NotFound);
    }

    #[test]
    fn landing_follows_role() {
        assert_eq!(AppRoute::landing_for(Role::Farmer), AppRoute::Dashboard);
        assert_eq!(AppRoute::landing_for(Role::Vendor), AppRoute::VendorDashboard);
    }
}
