//! 传输层接缝
//!
//! `SessionClient` 通过此 trait 发送请求：浏览器内走 `web::HttpClient`
//! (fetch)，单元测试注入脚本化 mock。接缝只搬运字节，不理解协议语义。

use async_trait::async_trait;

use super::error::{ApiError, ApiResult};
use crate::web::HttpClient;
use agromod_shared::protocol::HttpMethod;

/// 即将出站的请求
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl TransportRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// 查找指定请求头（大小写敏感，与写入侧一致）
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 设置请求头；同名头先移除再写入
    pub fn set_header(&mut self, key: &str, value: String) {
        self.headers.retain(|(k, _)| k != key);
        self.headers.push((key.to_string(), value));
    }

    pub fn remove_header(&mut self, key: &str) {
        self.headers.retain(|(k, _)| k != key);
    }
}

/// 原始响应：状态码加响应体文本
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 传输接缝
#[async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, request: &TransportRequest) -> ApiResult<TransportResponse>;
}

/// 生产实现：浏览器 fetch
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn execute(&self, request: &TransportRequest) -> ApiResult<TransportResponse> {
        let mut builder = HttpClient::request(request.method.as_str(), &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

/// 脚本化 mock，供单元测试使用
///
/// 以 `"METHOD path"` 为键排队响应；每次命中消费一个。
/// 同时记录操作日志（含 Authorization 头）以便断言调用顺序。
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use agromod_shared::AUTH_HEADER;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};
    use std::rc::Rc;

    #[derive(Default)]
    pub(crate) struct MockTransport {
        log: RefCell<Vec<String>>,
        responses: RefCell<HashMap<String, VecDeque<ApiResult<TransportResponse>>>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        fn key(method: HttpMethod, url: &str) -> String {
            format!("{} {}", method.as_str(), url)
        }

        /// 排队一个响应
        pub(crate) fn enqueue(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
            self.responses
                .borrow_mut()
                .entry(Self::key(method, url))
                .or_default()
                .push_back(Ok(TransportResponse {
                    status,
                    body: body.to_string(),
                }));
        }

        /// 排队一个传输层错误（如网络断开）
        pub(crate) fn enqueue_error(&self, method: HttpMethod, url: &str, error: ApiError) {
            self.responses
                .borrow_mut()
                .entry(Self::key(method, url))
                .or_default()
                .push_back(Err(error));
        }

        pub(crate) fn log(&self) -> Vec<String> {
            self.log.borrow().clone()
        }

        /// 某 URL 被请求的次数
        pub(crate) fn hits(&self, url: &str) -> usize {
            self.log
                .borrow()
                .iter()
                .filter(|entry| entry.contains(url))
                .count()
        }
    }

    #[async_trait(?Send)]
    impl Transport for Rc<MockTransport> {
        async fn execute(&self, request: &TransportRequest) -> ApiResult<TransportResponse> {
            let auth = request
                .header(AUTH_HEADER)
                .map(|v| format!(" auth={}", v))
                .unwrap_or_default();
            self.log.borrow_mut().push(format!(
                "{} {}{}",
                request.method.as_str(),
                request.url,
                auth
            ));

            self.responses
                .borrow_mut()
                .get_mut(&MockTransport::key(request.method, &request.url))
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| {
                    panic!(
                        "no scripted response for {} {}",
                        request.method.as_str(),
                        request.url
                    )
                })
        }
    }
}
