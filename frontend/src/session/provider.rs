//! 会话状态机
//!
//! "当前登录者是谁"的唯一权威。状态只有三种：
//! `Resolving`（启动时身份未定）-> `Authenticated` 或 `Anonymous`。
//! 路由守卫在 `Resolving` 期间必须等待，绝不在身份未定时重定向。

use std::sync::{Arc, Mutex};

use super::client::SessionClient;
use super::error::ApiResult;
use super::token_store::TokenStore;
use super::transport::Transport;
use crate::web::console_log;
use agromod_shared::protocol::{
    AuthResponse, ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, MeRequest,
    RegisterRequest, ResetPasswordRequest, ResetPasswordResponse,
};
use agromod_shared::{Role, User};

/// 会话状态
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// 启动解析进行中，身份未知
    Resolving,
    /// 已确认登录身份
    Authenticated(User),
    /// 确认未登录
    Anonymous,
}

/// 会话提供者
///
/// 持有与 `SessionClient` 相同的凭据存储；登录、登出、启动解析
/// 都经由这里修改状态，页面组件只读。
pub struct SessionProvider<S: TokenStore, T: Transport> {
    client: Arc<SessionClient<S, T>>,
    state: Mutex<SessionState>,
}

impl<S: TokenStore, T: Transport> SessionProvider<S, T> {
    pub fn new(client: Arc<SessionClient<S, T>>) -> Self {
        Self {
            client,
            state: Mutex::new(SessionState::Resolving),
        }
    }

    pub fn client(&self) -> &Arc<SessionClient<S, T>> {
        &self.client
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().unwrap().clone()
    }

    /// 已登录用户（未登录或解析中为 None）
    pub fn identity(&self) -> Option<User> {
        match &*self.state.lock().unwrap() {
            SessionState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().map(|user| user.role)
    }

    pub fn is_resolving(&self) -> bool {
        matches!(&*self.state.lock().unwrap(), SessionState::Resolving)
    }

    /// 启动解析：根据持久化凭据确定初始身份
    ///
    /// 无 access token 时直接判定未登录，不发任何请求；
    /// 有 token 则向身份端点验证，验证失败视为凭据失效，
    /// 清空存储后判定未登录。解析结束后状态必为
    /// `Authenticated` 或 `Anonymous` 之一。
    pub async fn resolve(&self) {
        if self.client.store().read().access.is_none() {
            *self.state.lock().unwrap() = SessionState::Anonymous;
            return;
        }

        match self.client.send(&MeRequest).await {
            Ok(user) => {
                console_log(&format!("[Session] Restored session for {}", user.email));
                *self.state.lock().unwrap() = SessionState::Authenticated(user);
            }
            Err(e) => {
                console_log(&format!("[Session] Stored credentials rejected: {}", e));
                self.client.store().clear();
                *self.state.lock().unwrap() = SessionState::Anonymous;
            }
        }
    }

    /// 登录成功后持久化两个令牌并进入已登录状态
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.client.send(&request).await?;
        Ok(self.accept(response))
    }

    /// 注册即登录：成功响应与登录同构
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        let response = self.client.send(request).await?;
        Ok(self.accept(response))
    }

    /// 采纳认证响应：令牌入库、状态切换
    ///
    /// 顶层 `role` 字段（若有）覆盖用户对象里的角色；
    /// 服务端是角色的唯一权威。
    fn accept(&self, response: AuthResponse) -> User {
        self.client
            .store()
            .save(Some(&response.access), Some(&response.refresh));

        let mut user = response.user;
        if let Some(role) = response.role {
            user.role = role;
        }
        *self.state.lock().unwrap() = SessionState::Authenticated(user.clone());
        user
    }

    /// 登出：清空凭据、回到未登录态（无需通知服务端）
    pub fn logout(&self) {
        self.client.store().clear();
        *self.state.lock().unwrap() = SessionState::Anonymous;
    }

    /// 会话过期（刷新失败）后的状态收敛
    ///
    /// 凭据已由客户端清空，这里只负责状态切换。
    pub fn mark_expired(&self) {
        *self.state.lock().unwrap() = SessionState::Anonymous;
    }

    pub async fn forgot_password(&self, email: &str) -> ApiResult<ForgotPasswordResponse> {
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.client.send(&request).await
    }

    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> ApiResult<ResetPasswordResponse> {
        self.client.send(request).await
    }
}

#[cfg(test)]
mod tests;
