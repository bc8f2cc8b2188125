//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现核心层的 `SessionStorage`。

use plantaid::session::SessionStorage;

/// 浏览器 localStorage
///
/// 隐私模式等场景下 localStorage 可能不可用，此时读写静默失败。
#[derive(Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStorage for BrowserStorage {
    fn load(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn save(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn remove(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
