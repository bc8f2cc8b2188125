//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 守卫判断交给核心层的 `guard`，这里只负责 History 与信号的同步。

use leptos::prelude::*;
use plantaid::route::{AppRoute, RouteDecision, guard};
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
}

/// 路由变更的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    /// 首次加载
    Initial,
    /// 站内链接或代码导航
    Navigate,
    /// 浏览器后退/前进
    Popstate,
    /// 会话状态变化后重新评估当前路由
    AuthChange,
}

/// 守卫决策需要写入的 History 记录
///
/// 只有主动导航会新增记录；会话变化时当前路由仍可渲染则不写入。
/// 未知路径保留原 URL。
fn history_write(trigger: Trigger, decision: RouteDecision) -> Option<(AppRoute, HistoryMode)> {
    let route = decision.route();
    if route == AppRoute::NotFound {
        return None;
    }
    match (trigger, decision) {
        (Trigger::Navigate, _) => Some((route, HistoryMode::Push)),
        (Trigger::AuthChange, RouteDecision::Render(_)) => None,
        (Trigger::Initial | Trigger::Popstate | Trigger::AuthChange, _) => {
            Some((route, HistoryMode::Replace))
        }
    }
}

fn write_history(path: &str, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let _ = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(path)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(path)),
    };
}

/// 路由器服务
///
/// 通过注入认证信号实现与会话系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let (current_route, set_route) = signal(AppRoute::from_path(&current_path()));
        let router = Self {
            current_route,
            set_route,
            is_authenticated,
        };
        // 首次加载也要经过守卫，例如未登录直接打开 /detect
        router.apply(router.current_route.get_untracked(), Trigger::Initial);
        router
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.apply(AppRoute::from_path(path), Trigger::Navigate);
    }

    fn apply(&self, target: AppRoute, trigger: Trigger) {
        let decision = guard(target, self.is_authenticated.get_untracked());
        if let RouteDecision::Redirect(to) = decision {
            log::info!("[Router] {} -> {}", target, to);
        }
        if let Some((route, mode)) = history_write(trigger, decision) {
            write_history(route.to_path(), mode);
        }
        self.set_route.set(decision.route());
    }

    /// 浏览器后退/前进
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            router.apply(AppRoute::from_path(&current_path()), Trigger::Popstate);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话变化后重新评估当前路由（登录后离开登录页、登出后离开受保护页）
    fn setup_auth_redirect(&self) {
        let router = *self;
        Effect::new(move |prev: Option<bool>| {
            let is_auth = router.is_authenticated.get();
            if prev.is_some_and(|p| p != is_auth) {
                router.apply(router.current_route.get_untracked(), Trigger::AuthChange);
            }
            is_auth
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(is_authenticated);
    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    move || matcher(router.current_route().get())
}

/// 站内链接，点击时走路由服务而不是整页跳转
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to.to_path());
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_change_on_renderable_route_leaves_history_alone() {
        // 登出时已在首页：不应再写入一条 "/"
        let decision = guard(AppRoute::Home, false);
        assert_eq!(history_write(Trigger::AuthChange, decision), None);
    }

    #[test]
    fn test_auth_change_redirect_replaces_entry() {
        let decision = guard(AppRoute::Detect, false);
        assert_eq!(
            history_write(Trigger::AuthChange, decision),
            Some((AppRoute::Login, HistoryMode::Replace))
        );

        let decision = guard(AppRoute::Login, true);
        assert_eq!(
            history_write(Trigger::AuthChange, decision),
            Some((AppRoute::Detect, HistoryMode::Replace))
        );
    }

    #[test]
    fn test_navigation_pushes_guarded_route() {
        assert_eq!(
            history_write(Trigger::Navigate, guard(AppRoute::Home, true)),
            Some((AppRoute::Home, HistoryMode::Push))
        );
        assert_eq!(
            history_write(Trigger::Navigate, guard(AppRoute::Detect, false)),
            Some((AppRoute::Login, HistoryMode::Push))
        );
        assert_eq!(
            history_write(Trigger::Popstate, guard(AppRoute::Signup, false)),
            Some((AppRoute::Signup, HistoryMode::Replace))
        );
    }

    #[test]
    fn test_unknown_path_keeps_url() {
        for trigger in [Trigger::Initial, Trigger::Navigate, Trigger::Popstate, Trigger::AuthChange] {
            assert_eq!(history_write(trigger, guard(AppRoute::NotFound, false)), None);
        }
    }
}
