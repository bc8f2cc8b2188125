use crate::components::credentials_form::{CredentialsForm, CredentialsState};
use crate::session::use_session;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use plantaid::route::AppRoute;
use plantaid::session::SignUpOutcome;

#[component]
pub fn SignupPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let state = CredentialsState::new();

    let on_submit = Callback::new(move |(email, password): (String, String)| {
        spawn_local(async move {
            let outcome = session.sign_up(&email, &password).await;
            state.finish();
            // 需要邮箱验证时先去登录页等待；失败时 sign_up 已经提示过错误
            if let Ok(SignUpOutcome::VerificationPending(_)) = outcome {
                router.navigate(AppRoute::Login.to_path());
            }
        });
    });

    view! {
        <CredentialsForm
            state=state
            title="Create an account"
            subtitle="Start protecting your garden today"
            submit_label="Sign Up"
            pending_label="Creating account..."
            on_submit=on_submit
        >
            "Already have an account? "
            <Link to=AppRoute::Login class="link link-success">
                "Sign in"
            </Link>
        </CredentialsForm>
    }
}
