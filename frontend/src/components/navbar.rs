use crate::components::icons::{House, Leaf, LogOut, Upload};
use crate::session::use_session;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use plantaid::route::AppRoute;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let is_authenticated = session.is_authenticated_signal();
    let email = session.email();

    let on_sign_out = move |_| {
        spawn_local(async move {
            // 失败时 sign_out 已经提示过错误
            if session.sign_out().await.is_ok() {
                router.navigate(AppRoute::Home.to_path());
            }
        });
    };

    let link_class = "btn btn-ghost gap-1 font-normal";

    view! {
        <div class="navbar bg-base-100 shadow-lg px-4">
            <div class="flex-1">
                <Link to=AppRoute::Home class="flex items-center gap-2">
                    <Leaf attr:class="h-8 w-8 text-success" />
                    <span class="text-xl font-bold">"PlantAId"</span>
                </Link>
            </div>
            <div class="flex-none hidden md:flex items-center gap-2">
                <Link to=AppRoute::Home class=link_class>
                    <House attr:class="h-5 w-5" />
                    "Home"
                </Link>
                <Link to=AppRoute::Detect class=link_class>
                    <Upload attr:class="h-5 w-5" />
                    "Detect Disease"
                </Link>
                <Show
                    when=move || is_authenticated.get()
                    fallback=|| {
                        view! {
                            <Link to=AppRoute::Login class="btn btn-success">
                                "Sign In"
                            </Link>
                        }
                    }
                >
                    <span class="badge badge-neutral hidden lg:inline-flex">
                        {move || email.get().unwrap_or_default()}
                    </span>
                    <button on:click=on_sign_out class="btn btn-ghost gap-1 font-normal">
                        <LogOut attr:class="h-5 w-5" />
                        "Sign Out"
                    </button>
                </Show>
            </div>
        </div>
    }
}
