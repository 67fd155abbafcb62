//! 公开首页

use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::{CloudSun, Microscope, ShoppingCart, Sprout, TrendingUp};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
fn FeatureCard(
    title: &'static str,
    description: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body items-center text-center">
                <div class="p-3 bg-primary/10 rounded-2xl text-primary">{children()}</div>
                <h3 class="card-title text-lg">{title}</h3>
                <p class="text-sm text-base-content/70">{description}</p>
            </div>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let cta = move |_| {
        // 已登录用户直达各自首页
        match auth.state.get_untracked().identity {
            Some(user) => router.navigate(AppRoute::landing_for(user.role).to_path()),
            None => router.navigate(AppRoute::Register.to_path()),
        }
    };

    view! {
        <div class="bg-base-200 min-h-screen">
            <div class="hero py-16">
                <div class="hero-content text-center">
                    <div class="max-w-2xl">
                        <h1 class="text-5xl font-bold">
                            "Smarter farming, " <span class="text-primary">"better harvests"</span>
                        </h1>
                        <p class="py-6 text-base-content/70">
                            "Agromod brings disease detection, yield forecasts, weather alerts, "
                            "mandi prices and a farm-to-vendor marketplace into one place."
                        </p>
                        <button class="btn btn-primary btn-lg" on:click=cta>
                            "Get started"
                        </button>
                    </div>
                </div>
            </div>

            <div class="max-w-5xl mx-auto px-4 pb-16 grid grid-cols-1 md:grid-cols-3 gap-4">
                <FeatureCard
                    title="Disease Detection"
                    description="Upload a photo of an affected crop and get a diagnosis with treatment advice."
                >
                    <Microscope attr:class="h-8 w-8" />
                </FeatureCard>
                <FeatureCard
                    title="Yield Prediction"
                    description="Estimate your harvest from crop, region and season."
                >
                    <Sprout attr:class="h-8 w-8" />
                </FeatureCard>
                <FeatureCard
                    title="Weather Alerts"
                    description="Localized forecasts and alerts for your fields."
                >
                    <CloudSun attr:class="h-8 w-8" />
                </FeatureCard>
                <FeatureCard
                    title="Mandi Prices"
                    description="Live market prices, history and short-term forecasts."
                >
                    <TrendingUp attr:class="h-8 w-8" />
                </FeatureCard>
                <FeatureCard
                    title="Marketplace"
                    description="Buy seeds, fertilizer and tools straight from vendors."
                >
                    <ShoppingCart attr:class="h-8 w-8" />
                </FeatureCard>
                <FeatureCard
                    title="Crop Planner"
                    description="Plan the season and get reminded before every activity."
                >
                    <Sprout attr:class="h-8 w-8" />
                </FeatureCard>
            </div>
        </div>
    }
}
