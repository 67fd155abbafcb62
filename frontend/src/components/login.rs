//! 登录页

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{login, use_auth, use_session};
use crate::components::icons::Leaf;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let session = use_session();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 已登录用户不应停留在登录页
    Effect::new(move |_| {
        let state = auth.state.get();
        if !state.is_loading {
            if let Some(user) = state.identity {
                router.navigate(AppRoute::landing_for(user.role).to_path());
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let session = session.clone();
        spawn_local(async move {
            match login(auth, &session, &email.get_untracked(), &password.get_untracked()).await {
                Ok(user) => {
                    // 登录落点由角色决定
                    router.navigate(AppRoute::landing_for(user.role).to_path());
                }
                Err(e) => set_error_msg.set(Some(e.message())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Leaf attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Welcome back"</h1>
                        <p class="text-base-content/70">"Log in to your Agromod account"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
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
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                            <label class="label">
                                <a
                                    class="label-text-alt link link-hover"
                                    on:click=move |_| {
                                        router.navigate(AppRoute::ForgotPassword.to_path())
                                    }
                                >
                                    "Forgot password?"
                                </a>
                            </label>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || {
                                    if is_submitting.get() {
                                        view! {
                                            <span class="loading loading-spinner"></span>
                                            "Logging in..."
                                        }
                                            .into_any()
                                    } else {
                                        "Log in".into_any()
                                    }
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "New to Agromod? "
                            <a
                                class="link link-primary"
                                on:click=move |_| router.navigate(AppRoute::Register.to_path())
                            >
                                "Create an account"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
