//! 通知提示
//!
//! 核心层只返回 `Notice`，由这里负责展示并在 3 秒后自动消失。

use leptos::prelude::*;
use plantaid::notice::Notice;
use std::time::Duration;

const DISMISS_AFTER: Duration = Duration::from_secs(3);

#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<(u64, Notice)>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn push(&self, notice: Notice) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.update(|items| items.push((id, notice)));

        let items = self.items;
        set_timeout(
            move || {
                items.try_update(|items| items.retain(|(i, _)| *i != id));
            },
            DISMISS_AFTER,
        );
    }

    pub fn push_opt(&self, notice: Option<Notice>) {
        if let Some(notice) = notice {
            self.push(notice);
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Notice::error(message));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Notice::success(message));
    }
}

pub fn provide_toasts() -> Toasts {
    let toasts = Toasts::new();
    provide_context(toasts);
    toasts
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>().expect("Toasts should be provided")
}

/// 通知容器（右上角）
#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toasts.items.get()
                key=|(id, _)| *id
                children=|(_, notice)| {
                    let class = if notice.is_error() {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    };
                    view! {
                        <div class=class>
                            <span>{notice.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
