//! 会话上下文
//!
//! 把核心层的 `SessionService` 接入 Leptos：状态镜像到信号，
//! 服务本身（非 Send）放在 `StoredValue::new_local` 中随根组件存活。

use crate::toast::Toasts;
use crate::web::{BrowserStorage, FetchHttpClient, Interval};
use leptos::prelude::*;
use leptos::task::spawn_local;
use plantaid::session::{
    AuthError, GoTrueClient, MSG_INIT_FAILED, MSG_SIGN_OUT_SUCCESS, MSG_SIGN_UP_SUCCESS,
    SESSION_STORAGE_KEY, SessionService, SessionState, SignUpOutcome, Subscription,
};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// 续期检查间隔
const REFRESH_TICK_MS: u32 = 30_000;

pub type BrowserProvider = GoTrueClient<FetchHttpClient, BrowserStorage>;
type Service = SessionService<BrowserProvider>;

/// 会话上下文
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: ReadSignal<SessionState>,
    service: StoredValue<Rc<Service>, LocalStorage>,
    toasts: Toasts,
}

impl SessionContext {
    pub fn is_loading(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_loading))
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_authenticated()))
    }

    pub fn email(&self) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.email().map(str::to_string)))
    }

    fn service(&self) -> Rc<Service> {
        self.service.get_value()
    }

    /// 失败时提示错误信息并把错误交还给调用方
    fn report<T>(&self, result: Result<T, AuthError>) -> Result<T, AuthError> {
        if let Err(e) = &result {
            self.toasts.error(e.to_string());
        }
        result
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let outcome = self.report(self.service().sign_up(email, password).await)?;
        self.toasts.success(MSG_SIGN_UP_SUCCESS);
        Ok(outcome)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.report(self.service().sign_in(email, password).await)
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.report(self.service().sign_out().await)?;
        self.toasts.success(MSG_SIGN_OUT_SUCCESS);
        Ok(())
    }
}

/// 创建会话上下文并启动初始化、定时续期与跨标签页同步
pub fn provide_session(service: Service, toasts: Toasts) -> SessionContext {
    let service = Rc::new(service);
    let (state, set_state) = signal(service.state());

    let subscription: Subscription = service.watch(move |s| set_state.set(s.clone()));
    StoredValue::new_local(subscription);

    {
        let service = service.clone();
        spawn_local(async move {
            if service.initialize().await.is_err() {
                toasts.error(MSG_INIT_FAILED);
            }
        });
    }

    let tick = {
        let service = service.clone();
        Interval::every(REFRESH_TICK_MS, move || {
            let service = service.clone();
            spawn_local(async move {
                if let Err(e) = service.refresh_if_expiring().await {
                    log::warn!("session refresh failed: {}", e);
                }
            });
        })
    };
    if tick.is_none() {
        log::warn!("session refresh timer unavailable");
    }
    StoredValue::new_local(tick);

    listen_storage_events(service.clone());

    let ctx = SessionContext {
        state,
        service: StoredValue::new_local(service),
        toasts,
    };
    provide_context(ctx);
    ctx
}

/// 其它标签页登录/登出时同步本页状态
fn listen_storage_events(service: Rc<Service>) {
    let closure = Closure::<dyn Fn(web_sys::StorageEvent)>::new(move |ev: web_sys::StorageEvent| {
        // key 为 None 表示整个 storage 被清空
        if ev.key().is_none_or(|k| k == SESSION_STORAGE_KEY) {
            service.sync_from_storage();
        }
    });

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

/// 从 Context 获取会话上下文
///
/// 必须位于 `provide_session` 的组件树之内，否则视为程序错误。
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
