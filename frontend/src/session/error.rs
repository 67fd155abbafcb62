//! 会话层错误类型
//!
//! 设计原则：除 401 刷新流程外，任何失败都原样抵达调用方；
//! 核心不吞错（参见 `client` 模块的重试契约）。

use std::fmt;

/// API 调用错误
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 网络层失败（超时、DNS、连接中断）
    Network(String),
    /// 请求体或响应体的 JSON 编解码失败
    Serialization(String),
    /// 服务端返回非 2xx 状态码，body 原样保留
    Http { status: u16, body: String },
}

impl ApiError {
    pub fn network(msg: impl Into<String>) -> Self {
        ApiError::Network(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        ApiError::Serialization(msg.into())
    }

    pub fn http(status: u16, body: impl Into<String>) -> Self {
        ApiError::Http {
            status,
            body: body.into(),
        }
    }

    /// HTTP 状态码（非 HTTP 错误为 None）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// 提取适合展示给用户的消息
    ///
    /// 服务端错误体通常形如 `{"detail": "..."}` 或 `{"error": "..."}`；
    /// 无法解析时退回原始 body 或状态码描述。
    pub fn message(&self) -> String {
        match self {
            ApiError::Network(msg) => format!("Network error: {}", msg),
            ApiError::Serialization(msg) => format!("Unexpected response: {}", msg),
            ApiError::Http { status, body } => {
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
                    for key in ["detail", "error", "message"] {
                        if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                            return text.to_string();
                        }
                    }
                }
                if body.trim().is_empty() {
                    format!("Request failed with status {}", status)
                } else {
                    body.clone()
                }
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Serialization(msg) => write!(f, "serialization error: {}", msg),
            ApiError::Http { status, body } => write!(f, "http {}: {}", status, body),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<crate::web::HttpError> for ApiError {
    fn from(e: crate::web::HttpError) -> Self {
        match e {
            crate::web::HttpError::NetworkError(msg) => ApiError::Network(msg),
            crate::web::HttpError::RequestBuildFailed(msg) => ApiError::Network(msg),
            crate::web::HttpError::ResponseParseFailed(msg) => ApiError::Serialization(msg),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_prefers_server_detail() {
        let err = ApiError::http(400, r#"{"detail":"Insufficient stock"}"#);
        assert_eq!(err.message(), "Insufficient stock");

        let err = ApiError::http(500, r#"{"error":"upstream timeout"}"#);
        assert_eq!(err.message(), "upstream timeout");
    }

    #[test]
    fn message_falls_back_to_body_then_status() {
        let err = ApiError::http(502, "Bad Gateway");
        assert_eq!(err.message(), "Bad Gateway");

        let err = ApiError::http(404, "");
        assert_eq!(err.message(), "Request failed with status 404");
    }

    #[test]
    fn unauthorized_detection() {
        assert!(ApiError::http(401, "").is_unauthorized());
        assert!(!ApiError::http(403, "").is_unauthorized());
        assert!(!ApiError::network("offline").is_unauthorized());
    }
}
