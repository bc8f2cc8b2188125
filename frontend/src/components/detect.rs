//! 病害检测页
//!
//! 页面只负责把 DOM 事件翻译成 `UploadFlow` 的状态迁移，
//! 完整的上传流程由核心层的 `submit_image` 驱动。

use crate::components::icons::{Upload, X};
use crate::toast::use_toasts;
use crate::web::{BrowserFile, FetchHttpClient};
use leptos::ev::DragEvent;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use plantaid::analysis::AnalysisClient;
use plantaid::upload::{FlowStore, Phase, UploadFlow, submit_image};
use plantaid::AnalysisResult;

/// 以响应式信号作为流程状态容器
#[derive(Clone, Copy)]
struct SignalFlow(RwSignal<UploadFlow>);

impl FlowStore for SignalFlow {
    fn update_flow<R>(&self, f: impl FnOnce(&mut UploadFlow) -> R) -> Option<R> {
        // 页面卸载后信号失效，返回 None
        self.0.try_update(f)
    }
}

/// 阻止浏览器打开被拖入的文件
fn swallow(ev: &DragEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
pub fn DetectPage() -> impl IntoView {
    view! {
        <main class="container mx-auto py-8 px-4">
            <div class="text-center mb-8">
                <h2 class="text-3xl font-bold">"Detect Plant Disease"</h2>
                <p class="mt-2 text-base-content/70">"Upload a leaf image to check for diseases"</p>
            </div>
            <ImageUpload />
        </main>
    }
}

#[component]
fn ImageUpload() -> impl IntoView {
    let toasts = use_toasts();
    let client = StoredValue::new(
        use_context::<AnalysisClient<FetchHttpClient>>()
            .expect("AnalysisClient should be provided"),
    );
    let flow = RwSignal::new(UploadFlow::new());
    let store = SignalFlow(flow);
    let file_input = NodeRef::<Input>::new();

    let submit = move |file: Option<BrowserFile>| {
        let Some(file) = file else {
            return;
        };
        let client = client.get_value();
        spawn_local(async move {
            toasts.push_opt(submit_image(&store, &client, &file).await);
        });
    };

    let on_drop = move |ev: DragEvent| {
        swallow(&ev);
        flow.update(UploadFlow::drop_received);
        let files = ev.data_transfer().and_then(|dt| dt.files());
        submit(BrowserFile::first_of(files));
    };

    let on_change = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        submit(BrowserFile::first_of(input.files()));
    };

    let on_clear = move |_| {
        flow.update(UploadFlow::clear);
        // 重置 input，允许再次选择同一个文件
        if let Some(input) = file_input.get() {
            input.set_value("");
        }
    };

    let open_picker = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let zone_class = move || {
        let base = "relative border-2 border-dashed rounded-box p-8 text-center transition-colors";
        let drag = if flow.with(|f| f.is_dragging()) {
            "border-success bg-success/10"
        } else {
            "border-base-300 hover:border-success/60"
        };
        let fill = if flow.with(|f| f.candidate().is_some()) {
            "bg-base-200"
        } else {
            "bg-base-100"
        };
        format!("{} {} {}", base, drag, fill)
    };

    let phase = Memo::new(move |_| flow.with(|f| f.phase()));
    let preview = move || flow.with(|f| f.preview().map(str::to_string));

    view! {
        <div class="max-w-2xl mx-auto" id="detect">
            <input
                type="file"
                accept="image/*"
                class="hidden"
                node_ref=file_input
                on:change=on_change
            />
            <div
                class=zone_class
                on:dragenter=move |ev: DragEvent| {
                    swallow(&ev);
                    flow.update(UploadFlow::drag_enter);
                }
                on:dragover=move |ev: DragEvent| swallow(&ev)
                on:dragleave=move |ev: DragEvent| {
                    swallow(&ev);
                    flow.update(UploadFlow::drag_leave);
                }
                on:drop=on_drop
            >
                <Show
                    when=move || phase.get() != Phase::Empty
                    fallback=move || {
                        view! {
                            <Upload attr:class="mx-auto h-12 w-12 text-base-content/40" />
                            <p class="mt-4 text-lg font-medium">"Upload a leaf image for analysis"</p>
                            <p class="mt-2 text-sm text-base-content/60">"Drag and drop or click to select"</p>
                            <button class="btn btn-success mt-4" on:click=open_picker>
                                "Select Image"
                            </button>
                        }
                    }
                >
                    <div class="space-y-6">
                        <div class="relative">
                            {move || match preview() {
                                Some(src) => {
                                    view! { <img src=src alt="Preview" class="max-h-96 mx-auto rounded-lg" /> }
                                        .into_any()
                                }
                                None => {
                                    view! { <span class="loading loading-spinner loading-lg text-success"></span> }
                                        .into_any()
                                }
                            }}
                            <button
                                class="btn btn-circle btn-error btn-sm absolute top-2 right-2"
                                on:click=on_clear
                            >
                                <X attr:class="h-5 w-5" />
                            </button>
                        </div>

                        {move || match phase.get() {
                            Phase::Analyzing => {
                                view! {
                                    <div class="flex items-center justify-center gap-2 text-success">
                                        <span class="loading loading-spinner loading-sm"></span>
                                        <span>"Analyzing image..."</span>
                                    </div>
                                }
                                    .into_any()
                            }
                            Phase::Resulted => {
                                flow.with(|f| f.result().cloned())
                                    .map(|result| view! { <ResultCard result=result /> }.into_any())
                                    .unwrap_or_else(|| ().into_any())
                            }
                            Phase::Failed => {
                                let message = flow.with(|f| f.error_message().unwrap_or_default().to_string());
                                view! {
                                    <div role="alert" class="alert alert-error">
                                        <span>{message}</span>
                                    </div>
                                }
                                    .into_any()
                            }
                            Phase::Empty | Phase::Previewing => ().into_any(),
                        }}
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn ResultCard(result: AnalysisResult) -> impl IntoView {
    let AnalysisResult {
        disease,
        confidence,
        treatment,
    } = result;

    view! {
        <div class="card bg-base-100 shadow-md text-left">
            <div class="card-body">
                <h3 class="card-title">"Analysis Results"</h3>
                <p class="text-lg">
                    <span class="font-medium">"Detected Disease: "</span>
                    <span class="text-error">{disease}</span>
                </p>
                {confidence.map(|c| {
                    view! {
                        <p>
                            <span class="font-medium">"Confidence: "</span>
                            {format!("{:.1}%", c * 100.0)}
                        </p>
                    }
                })}
                {treatment.map(|t| {
                    view! {
                        <div class="mt-4">
                            <h4 class="font-medium mb-2">"Recommended Treatment:"</h4>
                            <p class="text-base-content/80">{t}</p>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
