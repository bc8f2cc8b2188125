//! PlantAId 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `web`: 浏览器 API 封装，为核心层的抽象提供实现
//! - `session`: 会话上下文
//! - `toast`: 通知展示
//! - `components`: UI 组件层

mod components {
    mod credentials_form;
    pub mod detect;
    pub mod home;
    mod icons;
    pub mod login;
    pub mod navbar;
    pub mod signup;
}
mod session;
mod toast;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod console;
    mod file;
    mod http;
    pub mod router;
    mod storage;
    mod timer;

    pub use console::ConsoleLogger;
    pub use file::BrowserFile;
    pub use http::FetchHttpClient;
    pub use storage::BrowserStorage;
    pub use timer::Interval;
}

pub use web::ConsoleLogger;

use crate::components::detect::DetectPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::signup::SignupPage;
use crate::session::provide_session;
use crate::toast::{Toaster, provide_toasts};
use crate::web::router::{Router, RouterOutlet};
use crate::web::{BrowserStorage, FetchHttpClient};

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use plantaid::analysis::AnalysisClient;
use plantaid::config::{
    ENV_ANALYSIS_URL, ENV_IDENTITY_ANON_KEY, ENV_IDENTITY_URL, MSG_MISSING_IDENTITY_CONFIG,
    RuntimeConfig,
};
use plantaid::route::AppRoute;
use plantaid::session::{Clock, GoTrueClient, SessionService};
use std::rc::Rc;

/// 构建期注入的配置（浏览器中没有进程环境变量）
fn build_time_env(key: &str) -> Option<String> {
    let value = match key {
        ENV_IDENTITY_URL => option_env!("PLANTAID_IDENTITY_URL"),
        ENV_IDENTITY_ANON_KEY => option_env!("PLANTAID_IDENTITY_ANON_KEY"),
        ENV_ANALYSIS_URL => option_env!("PLANTAID_ANALYSIS_URL"),
        _ => None,
    };
    value.map(str::to_string)
}

fn browser_clock() -> Clock {
    Rc::new(|| {
        DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    })
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Detect => view! { <DetectPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[calc(100vh-4rem)]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 通知与配置
    let toasts = provide_toasts();
    let (config, issues) = RuntimeConfig::from_lookup(build_time_env);
    if !issues.is_empty() {
        for issue in &issues {
            log::error!("{}", issue);
        }
        toasts.error(MSG_MISSING_IDENTITY_CONFIG);
    }

    // 2. 分析服务客户端
    provide_context(AnalysisClient::new(FetchHttpClient, &config.analysis_url));

    // 3. 会话服务（应用生命周期内唯一）
    let provider = GoTrueClient::new(
        FetchHttpClient,
        BrowserStorage,
        &config.identity_url,
        &config.identity_anon_key,
        browser_clock(),
    );
    let session = provide_session(SessionService::new(Rc::new(provider)), toasts);

    let is_loading = session.is_loading();
    let is_authenticated = session.is_authenticated_signal();

    view! {
        <Toaster />
        // 4. 会话恢复完成之前不做路由守卫判断
        <Show
            when=move || !is_loading.get()
            fallback=|| view! {
                <div class="min-h-screen flex items-center justify-center">
                    <span class="loading loading-spinner loading-lg text-success"></span>
                </div>
            }
        >
            <Router is_authenticated=is_authenticated>
                <div class="min-h-screen bg-base-200">
                    <Navbar />
                    <RouterOutlet matcher=route_matcher />
                </div>
            </Router>
        </Show>
    }
}
