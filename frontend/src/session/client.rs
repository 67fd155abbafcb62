//! 统一出站请求通道
//!
//! 契约（与既有部署的拦截器语义一致）：
//! - 存储中有 access token 时，每个出站请求都附加 `Authorization: Bearer`
//! - 收到 401 且该请求尚未重试过时：标记已重试 -> 若无 refresh token
//!   则原样返回 401 -> 否则调用刷新端点换取新 access token，只持久化
//!   access，原请求换上新令牌重发恰好一次，重发结果即最终结果
//! - 刷新本身失败：清空凭据存储、通知会话过期钩子，调用方收到的
//!   仍是**原始 401**（而非刷新错误）
//! - 其余错误（非 401 的 4xx、5xx、网络错误）原样透传，不触碰凭据
//! - 并发 401 各自独立刷新，无跨请求去重；单线程事件循环下无需加锁

use std::sync::{Arc, Mutex};

use super::error::{ApiError, ApiResult};
use super::token_store::TokenStore;
use super::transport::{Transport, TransportRequest, TransportResponse};
use crate::web::console_warn;
use agromod_shared::protocol::{ApiRequest, RefreshRequest, RefreshResponse};
use agromod_shared::{AUTH_HEADER, AUTH_SCHEME};

/// 出站请求及其重试标记
///
/// 单次重试不变式的显式载体：不在请求对象上偷偷打补丁，
/// 而是让"是否已重试"成为可检查的状态。
#[derive(Debug)]
pub struct RequestAttempt {
    pub request: TransportRequest,
    pub already_retried: bool,
}

impl RequestAttempt {
    pub fn new(request: TransportRequest) -> Self {
        Self {
            request,
            already_retried: false,
        }
    }
}

/// 会话感知的 API 客户端
pub struct SessionClient<S: TokenStore, T: Transport> {
    base_url: String,
    store: Arc<S>,
    transport: T,
    /// 刷新失败（会话终止）时的通知钩子；UI 外壳借此跳转登录页
    on_session_expired: Mutex<Option<Box<dyn Fn() + Send>>>,
}

impl<S: TokenStore, T: Transport> SessionClient<S, T> {
    pub fn new(base_url: &str, store: Arc<S>, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            transport,
            on_session_expired: Mutex::new(None),
        }
    }

    /// 凭据存储（与 `SessionProvider` 共享）
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// 注册会话过期钩子；后注册者覆盖前者
    pub fn set_session_expired_hook(&self, hook: impl Fn() + Send + 'static) {
        *self.on_session_expired.lock().unwrap() = Some(Box::new(hook));
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送强类型请求并获取解析后的响应
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let mut request = TransportRequest::new(R::METHOD, self.url(&req.path()));
        if R::METHOD.has_body() {
            let body = serde_json::to_string(req)
                .map_err(|e| ApiError::serialization(e.to_string()))?;
            request.body = Some(body);
        }

        let response = self.dispatch(RequestAttempt::new(request)).await?;
        Self::decode(&response.body)
    }

    /// 空响应体按 `{}` 解析，兼容只回 2xx 无内容的端点
    fn decode<D: serde::de::DeserializeOwned>(body: &str) -> ApiResult<D> {
        let effective = if body.trim().is_empty() { "{}" } else { body };
        serde_json::from_str(effective).map_err(|e| ApiError::serialization(e.to_string()))
    }

    /// 请求派发：附加令牌 -> 发送 -> 按契约处理 401
    async fn dispatch(&self, mut attempt: RequestAttempt) -> ApiResult<TransportResponse> {
        self.attach_token(&mut attempt.request);
        let response = self.transport.execute(&attempt.request).await?;

        if response.status != 401 || attempt.already_retried {
            return Self::finish(response);
        }

        // 幂等保护：先标记，确保同一请求至多重试一次
        attempt.already_retried = true;

        let Some(refresh) = self.store.read().refresh else {
            // 无 refresh token，原样返回失败
            return Self::finish(response);
        };

        match self.exchange_refresh_token(&refresh).await {
            Ok(new_access) => {
                // 只覆盖 access；refresh 保持不变
                self.store.save(Some(&new_access), None);
                self.attach_token(&mut attempt.request);
                let second = self.transport.execute(&attempt.request).await?;
                // 重发结果即最终结果，不再进入刷新流程
                Self::finish(second)
            }
            Err(_) => {
                // 终止性失败：清空凭据并通知外壳；调用方收到原始 401
                console_warn("[Session] Token refresh failed. Clearing credentials.");
                self.store.clear();
                if let Some(hook) = self.on_session_expired.lock().unwrap().as_ref() {
                    hook();
                }
                Self::finish(response)
            }
        }
    }

    /// 用 refresh token 换取新 access token
    ///
    /// 刷新请求不携带 Authorization 头，也绝不参与重试。
    async fn exchange_refresh_token(&self, refresh: &str) -> ApiResult<String> {
        let payload = RefreshRequest {
            refresh: refresh.to_string(),
        };
        let body = serde_json::to_string(&payload)
            .map_err(|e| ApiError::serialization(e.to_string()))?;

        let mut request =
            TransportRequest::new(RefreshRequest::METHOD, self.url(RefreshRequest::PATH));
        request.body = Some(body);

        let response = self.transport.execute(&request).await?;
        let response = Self::finish(response)?;
        let parsed: RefreshResponse = Self::decode(&response.body)?;
        Ok(parsed.access)
    }

    fn attach_token(&self, request: &mut TransportRequest) {
        match self.store.read().access {
            Some(access) => {
                request.set_header(AUTH_HEADER, format!("{} {}", AUTH_SCHEME, access));
            }
            None => request.remove_header(AUTH_HEADER),
        }
    }

    fn finish(response: TransportResponse) -> ApiResult<TransportResponse> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::http(response.status, response.body))
        }
    }
}

#[cfg(test)]
mod tests;
