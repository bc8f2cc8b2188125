//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生 `setInterval`，用于会话的周期性续期检查。

use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// `Interval` 被 drop 时自动清除定时器。
pub struct Interval {
    handle: i32,
    _closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 每隔 `millis` 毫秒触发一次 `callback`
    ///
    /// 无法获取 window 或注册失败时返回 None。
    pub fn every<F>(millis: u32, callback: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn Fn()>::new(callback);
        let handle = web_sys::window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .ok()?;

        Some(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}
