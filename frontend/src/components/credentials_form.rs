//! 邮箱/密码表单
//!
//! 登录页与注册页共用，`CredentialsState` 把零散的 signal 整合在一起。

use leptos::prelude::*;

const MIN_PASSWORD_LEN: usize = 6;

/// 表单状态
///
/// 使用 `RwSignal` 因为它实现了 `Copy`，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct CredentialsState {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub is_submitting: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl CredentialsState {
    pub fn new() -> Self {
        Self {
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            is_submitting: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// 校验输入，返回去掉首尾空白的邮箱与原始密码
    fn validate(&self) -> Result<(String, String), &'static str> {
        let email = self.email.get_untracked().trim().to_string();
        let password = self.password.get_untracked();
        if email.is_empty() || password.is_empty() {
            return Err("Please fill in all fields");
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err("Password must be at least 6 characters");
        }
        Ok((email, password))
    }

    /// 请求结束；页面可能已经被路由切走
    ///
    /// 身份服务的错误已经以通知形式展示，表单内只显示输入校验错误。
    pub fn finish(&self) {
        self.is_submitting.try_set(false);
    }
}

impl Default for CredentialsState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn CredentialsForm(
    state: CredentialsState,
    title: &'static str,
    subtitle: &'static str,
    submit_label: &'static str,
    pending_label: &'static str,
    /// 校验通过后收到 (email, password)
    on_submit: Callback<(String, String)>,
    /// 表单下方的切换链接
    children: Children,
) -> impl IntoView {
    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if state.is_submitting.get_untracked() {
            return;
        }
        match state.validate() {
            Ok(credentials) => {
                state.error.set(None);
                state.is_submitting.set(true);
                on_submit.run(credentials);
            }
            Err(msg) => state.error.set(Some(msg.to_string())),
        }
    };

    view! {
        <div class="hero min-h-[calc(100vh-4rem)] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">{title}</h1>
                    <p class="text-base-content/70">{subtitle}</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=handle_submit>
                        <Show when=move || state.error.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || state.error.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                autocomplete="email"
                                placeholder="you@example.com"
                                on:input=move |ev| state.email.set(event_target_value(&ev))
                                prop:value=state.email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| state.password.set(event_target_value(&ev))
                                prop:value=state.password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-success" disabled=move || state.is_submitting.get()>
                                {move || if state.is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> {pending_label} }.into_any()
                                } else {
                                    submit_label.into_any()
                                }}
                            </button>
                        </div>
                        <div class="text-center text-sm mt-2">{children()}</div>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_email_and_checks_password() {
        let owner = Owner::new();
        owner.with(|| {
            let state = CredentialsState::new();
            assert!(state.validate().is_err());

            state.email.set("  grower@example.com ".to_string());
            state.password.set("12345".to_string());
            assert_eq!(state.validate(), Err("Password must be at least 6 characters"));

            state.password.set("123456".to_string());
            assert_eq!(
                state.validate(),
                Ok(("grower@example.com".to_string(), "123456".to_string()))
            );
        });
    }

    #[test]
    fn test_finish_only_ends_submission() {
        let owner = Owner::new();
        owner.with(|| {
            let state = CredentialsState::new();
            state.is_submitting.set(true);

            state.finish();

            assert!(!state.is_submitting.get_untracked());
            assert_eq!(state.error.get_untracked(), None);
        });
    }
}
