use crate::components::icons::{Leaf, Shield, Sprout};
use crate::web::router::Link;
use leptos::prelude::*;
use plantaid::route::AppRoute;

const HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1466692476868-aef1dfb1e735?auto=format&fit=crop&q=80";

const GALLERY: [(&str, &str); 3] = [
    (
        "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?auto=format&fit=crop&q=80",
        "Healthy plant 1",
    ),
    (
        "https://images.unsplash.com/photo-1520412099551-62b6bafeb5bb?auto=format&fit=crop&q=80",
        "Healthy plant 2",
    ),
    (
        "https://images.unsplash.com/photo-1509223197845-458d87318791?auto=format&fit=crop&q=80",
        "Healthy plant 3",
    ),
];

#[component]
fn FeatureCard(title: &'static str, description: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body items-center text-center">
                <div class="text-success mb-2">{children()}</div>
                <h3 class="card-title">{title}</h3>
                <p class="text-base-content/70">{description}</p>
            </div>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="space-y-16 pb-8">
            <div
                class="hero min-h-[500px]"
                style=format!("background-image: url({});", HERO_IMAGE)
            >
                <div class="hero-overlay bg-black/50"></div>
                <div class="hero-content text-center text-neutral-content">
                    <div class="max-w-xl">
                        <h1 class="text-5xl font-bold mb-4">"Plant Disease Detection"</h1>
                        <p class="text-xl mb-8">
                            "Protect your garden with AI-powered leaf disease detection"
                        </p>
                        <Link to=AppRoute::Detect class="btn btn-success btn-lg">
                            "Detect Now"
                        </Link>
                    </div>
                </div>
            </div>

            <div class="max-w-6xl mx-auto px-4">
                <h2 class="text-3xl font-bold text-center mb-12">"How It Works"</h2>
                <div class="grid md:grid-cols-3 gap-8">
                    <FeatureCard
                        title="Quick Disease Detection"
                        description="Upload a leaf photo and get instant disease diagnosis"
                    >
                        <Leaf attr:class="h-8 w-8" />
                    </FeatureCard>
                    <FeatureCard
                        title="Protect Your Plants"
                        description="Early detection helps prevent disease spread"
                    >
                        <Shield attr:class="h-8 w-8" />
                    </FeatureCard>
                    <FeatureCard title="Expert Analysis" description="Powered by advanced AI technology">
                        <Sprout attr:class="h-8 w-8" />
                    </FeatureCard>
                </div>
            </div>

            <div class="max-w-6xl mx-auto px-4">
                <h2 class="text-3xl font-bold text-center mb-12">"Healthy Garden Gallery"</h2>
                <div class="grid md:grid-cols-3 gap-4">
                    {GALLERY
                        .iter()
                        .map(|(src, alt)| {
                            view! { <img src=*src alt=*alt class="rounded-lg h-64 w-full object-cover" /> }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}
