//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 真正的会话逻辑在 `session::SessionProvider`；本模块把它的状态
//! 镜像进 Leptos 信号，路由服务通过注入的信号检查认证状态。

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::session::{
    ApiResult, BrowserTokenStore, FetchTransport, SessionClient, SessionProvider, SessionState,
};
use crate::web::console_log;
use agromod_shared::protocol::RegisterRequest;
use agromod_shared::{Role, User};

/// 生产环境的具体会话类型
pub type AppClient = SessionClient<BrowserTokenStore, FetchTransport>;
pub type AppSession = SessionProvider<BrowserTokenStore, FetchTransport>;

/// 认证状态（信号镜像）
#[derive(Clone, PartialEq)]
pub struct AuthState {
    /// 已登录用户（解析中或未登录为 None）
    pub identity: Option<User>,
    /// 启动解析是否仍在进行
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        // 启动时身份未定，守卫必须等待
        Self {
            identity: None,
            is_loading: true,
        }
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 解析中信号（用于路由服务注入）
    pub fn is_resolving_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_loading)
    }

    /// 当前角色信号（用于路由服务注入）
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let state = self.state;
        Signal::derive(move || state.get().identity.as_ref().map(|user| user.role))
    }

    /// 将会话快照镜像进信号
    fn sync(&self, snapshot: SessionState) {
        self.set_state.update(|state| match snapshot {
            SessionState::Resolving => state.is_loading = true,
            SessionState::Authenticated(user) => {
                state.identity = Some(user);
                state.is_loading = false;
            }
            SessionState::Anonymous => {
                state.identity = None;
                state.is_loading = false;
            }
        });
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 会话提供者句柄（Context 共享）
#[derive(Clone)]
pub struct SessionHandle(pub Arc<AppSession>);

pub fn use_session() -> Arc<AppSession> {
    use_context::<SessionHandle>()
        .expect("SessionHandle should be provided")
        .0
}

/// 初始化认证状态
///
/// 1. 注册会话过期钩子：刷新失败时立即转为未登录，
///    路由守卫 Effect 会自动把用户送回登录页
/// 2. 异步解析持久化凭据，完成后镜像结果
pub fn init_auth(ctx: AuthContext, session: Arc<AppSession>) {
    let hook_session = session.clone();
    session.client().set_session_expired_hook(move || {
        console_log("[Auth] Session expired. Returning to anonymous state.");
        hook_session.mark_expired();
        ctx.sync(SessionState::Anonymous);
    });

    spawn_local(async move {
        session.resolve().await;
        ctx.sync(session.snapshot());
    });
}

/// 登录并镜像状态
pub async fn login(
    ctx: AuthContext,
    session: &Arc<AppSession>,
    email: &str,
    password: &str,
) -> ApiResult<User> {
    let user = session.login(email, password).await?;
    ctx.sync(session.snapshot());
    Ok(user)
}

/// 注册（成功即登录）并镜像状态
pub async fn register_account(
    ctx: AuthContext,
    session: &Arc<AppSession>,
    request: &RegisterRequest,
) -> ApiResult<User> {
    let user = session.register(request).await?;
    ctx.sync(session.snapshot());
    Ok(user)
}

/// 注销并清除状态
///
/// 导航将由路由服务的会话状态监听自动处理。
pub fn logout(ctx: AuthContext, session: &Arc<AppSession>) {
    session.logout();
    ctx.sync(session.snapshot());
}
