//! LocalStorage 封装模块
//!
//! 对 `web_sys::Storage` 的轻量封装，替代 `gloo-storage`。
//! 会话令牌与用户资料都经由这里落盘。

/// 本地存储操作封装
pub struct LocalStorage;

impl LocalStorage {
    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    // 非 wasm 目标（单元测试）没有 window，读写一律退化为 no-op
    #[cfg(not(target_arch = "wasm32"))]
    fn storage() -> Option<web_sys::Storage> {
        None
    }

    /// 读取键对应的字符串值，键不存在或底层出错都返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 写入键值，返回是否成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除键，返回是否成功
    pub fn remove(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
