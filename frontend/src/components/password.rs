//! 忘记密码 / 重置密码

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use agromod_shared::protocol::ResetPasswordRequest;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (message, set_message) = signal(Option::<String>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let session = session.clone();
        spawn_local(async move {
            match session.forgot_password(&email.get_untracked()).await {
                Ok(response) => {
                    let mut text = if response.message.is_empty() {
                        "If the account exists, a reset link has been sent.".to_string()
                    } else {
                        response.message
                    };
                    // 开发环境会把重置令牌直接回显
                    if let Some(token) = response.reset_token {
                        text = format!("{} Reset token: {}", text, token);
                    }
                    set_message.set(Some(text));
                }
                Err(e) => set_error_msg.set(Some(e.message())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Forgot password"</h1>
                <p class="text-base-content/70">
                    "Enter your email and we will send you a reset token."
                </p>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || message.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || message.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label"><span class="label-text">"Email"</span></label>
                            <input
                                type="email"
                                class="input input-bordered"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                "Send reset token"
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            <a
                                class="link link-primary"
                                on:click=move |_| router.navigate(AppRoute::ResetPassword.to_path())
                            >
                                "I already have a token"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (token, set_token) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let request = ResetPasswordRequest {
            email: email.get_untracked(),
            token: token.get_untracked(),
            new_password: new_password.get_untracked(),
        };

        let session = session.clone();
        spawn_local(async move {
            match session.reset_password(&request).await {
                // 重置成功后引导回登录页
                Ok(_) => router.navigate(AppRoute::Login.to_path()),
                Err(e) => set_error_msg.set(Some(e.message())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Reset password"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label"><span class="label-text">"Email"</span></label>
                            <input
                                type="email"
                                class="input input-bordered"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Reset token"</span></label>
                            <input
                                type="text"
                                class="input input-bordered font-mono"
                                on:input=move |ev| set_token.set(event_target_value(&ev))
                                prop:value=token
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"New password"</span>
                            </label>
                            <input
                                type="password"
                                class="input input-bordered"
                                on:input=move |ev| set_new_password.set(event_target_value(&ev))
                                prop:value=new_password
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                "Reset password"
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
