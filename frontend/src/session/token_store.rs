//! 凭据对持久化
//!
//! 不变式：access 与 refresh 要么成对存在，要么视为未登录；
//! 只有 refresh 而无 access 的状态在刷新成功前一律按未登录处理
//! （由 `provider` 的启动逻辑保证，本层只做忠实存取）。

use crate::web::LocalStorage;
use agromod_shared::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

/// 读取到的凭据对；缺失的值为 `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPair {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

/// 凭据存储接缝
///
/// 生产实现为 `BrowserTokenStore`（localStorage）；
/// 测试中以内存实现替代。所有操作都不触网、不失败。
pub trait TokenStore {
    /// 写入提供的值；传 `None` 的一侧保持原值不变
    /// （刷新响应只携带新 access，这正是只更新一侧的场景）。
    fn save(&self, access: Option<&str>, refresh: Option<&str>);

    /// 读取当前凭据对；从不失败，缺失读出为 `None`
    fn read(&self) -> TokenPair;

    /// 无条件清除两个值
    fn clear(&self);
}

/// localStorage 实现，键名与既有部署保持一致
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStore;

impl TokenStore for BrowserTokenStore {
    fn save(&self, access: Option<&str>, refresh: Option<&str>) {
        if let Some(access) = access {
            LocalStorage::set(ACCESS_TOKEN_KEY, access);
        }
        if let Some(refresh) = refresh {
            LocalStorage::set(REFRESH_TOKEN_KEY, refresh);
        }
    }

    fn read(&self) -> TokenPair {
        TokenPair {
            access: LocalStorage::get(ACCESS_TOKEN_KEY),
            refresh: LocalStorage::get(REFRESH_TOKEN_KEY),
        }
    }

    fn clear(&self) {
        LocalStorage::delete(ACCESS_TOKEN_KEY);
        LocalStorage::delete(REFRESH_TOKEN_KEY);
    }
}

/// 内存实现，供单元测试使用
#[cfg(test)]
pub(crate) mod testing {
    use super::{TokenPair, TokenStore};
    use std::cell::RefCell;

    #[derive(Debug, Default)]
    pub(crate) struct MemoryTokenStore {
        pair: RefCell<TokenPair>,
    }

    impl MemoryTokenStore {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_tokens(access: Option<&str>, refresh: Option<&str>) -> Self {
            let store = Self::new();
            store.save(access, refresh);
            store
        }
    }

    impl TokenStore for MemoryTokenStore {
        fn save(&self, access: Option<&str>, refresh: Option<&str>) {
            let mut pair = self.pair.borrow_mut();
            if let Some(access) = access {
                pair.access = Some(access.to_string());
            }
            if let Some(refresh) = refresh {
                pair.refresh = Some(refresh.to_string());
            }
        }

        fn read(&self) -> TokenPair {
            self.pair.borrow().clone()
        }

        fn clear(&self) {
            *self.pair.borrow_mut() = TokenPair::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryTokenStore;
    use super::*;

    #[test]
    fn absent_values_read_back_as_none() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.read(), TokenPair::default());
    }

    #[test]
    fn partial_save_leaves_other_value_untouched() {
        let store = MemoryTokenStore::with_tokens(Some("T1"), Some("R1"));

        // Refresh-only response: update just the access token
        store.save(Some("T2"), None);
        let pair = store.read();
        assert_eq!(pair.access.as_deref(), Some("T2"));
        assert_eq!(pair.refresh.as_deref(), Some("R1"));

        store.save(None, Some("R2"));
        let pair = store.read();
        assert_eq!(pair.access.as_deref(), Some("T2"));
        assert_eq!(pair.refresh.as_deref(), Some("R2"));
    }

    #[test]
    fn clear_removes_both_unconditionally() {
        let store = MemoryTokenStore::with_tokens(Some("T1"), Some("R1"));
        store.clear();
        assert_eq!(store.read(), TokenPair::default());
    }
}
