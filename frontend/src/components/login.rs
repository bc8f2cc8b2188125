use crate::components::credentials_form::{CredentialsForm, CredentialsState};
use crate::session::use_session;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use plantaid::route::AppRoute;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let state = CredentialsState::new();

    // 登录成功后由路由服务监听会话变化并跳转到检测页
    let on_submit = Callback::new(move |(email, password): (String, String)| {
        spawn_local(async move {
            // 失败时 sign_in 已经提示过错误
            let _ = session.sign_in(&email, &password).await;
            state.finish();
        });
    });

    view! {
        <CredentialsForm
            state=state
            title="Welcome back"
            subtitle="Sign in to analyze your plants"
            submit_label="Sign In"
            pending_label="Signing in..."
            on_submit=on_submit
        >
            "No account yet? "
            <Link to=AppRoute::Signup class="link link-success">
                "Sign up"
            </Link>
        </CredentialsForm>
    }
}
