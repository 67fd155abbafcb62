//! 认证会话核心
//!
//! - `token_store`: 凭据对的持久化（localStorage）
//! - `transport`: 传输层接缝（生产环境为 fetch，测试为脚本化 mock）
//! - `client`: 统一出站请求通道，负责令牌附加与一次性 401 刷新重试
//! - `provider`: 会话状态机，"当前登录者是谁"的唯一权威
//! - `error`: 会话层错误类型

mod client;
mod error;
mod provider;
mod token_store;
mod transport;

pub use client::SessionClient;
pub use error::{ApiError, ApiResult};
pub use provider::{SessionProvider, SessionState};
pub use token_store::{BrowserTokenStore, TokenStore};
pub use transport::FetchTransport;
