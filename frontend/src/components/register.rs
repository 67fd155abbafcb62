//! 注册页
//!
//! 选择农户/商户角色后显示对应的画像字段；
//! 提交成功即登录，落点以服务端返回的角色为准。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{register_account, use_auth, use_session};
use crate::components::icons::Sprout;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use agromod_shared::protocol::RegisterRequest;
use agromod_shared::{FarmerProfile, Role, VendorProfile};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let session = use_session();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (role, set_role) = signal(Role::Farmer);

    // 农户画像
    let (region, set_region) = signal(String::new());
    let (preferred_crops, set_preferred_crops) = signal(String::new());
    // 商户画像
    let (business_name, set_business_name) = signal(String::new());
    let (contact_phone, set_contact_phone) = signal(String::new());

    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Email and password are required".to_string()));
            return;
        }

        let request = RegisterRequest {
            email: email.get_untracked(),
            password: password.get_untracked(),
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            phone: phone.get_untracked(),
            role: role.get_untracked(),
            farmer_profile: (role.get_untracked() == Role::Farmer).then(|| FarmerProfile {
                region: region.get_untracked(),
                preferred_crops: preferred_crops.get_untracked(),
            }),
            vendor_profile: (role.get_untracked() == Role::Vendor).then(|| VendorProfile {
                business_name: business_name.get_untracked(),
                contact_phone: contact_phone.get_untracked(),
            }),
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let session = session.clone();
        spawn_local(async move {
            match register_account(auth, &session, &request).await {
                // 落点按服务端确认的角色，而非表单选择
                Ok(user) => router.navigate(AppRoute::landing_for(user.role).to_path()),
                Err(e) => set_error_msg.set(Some(e.message())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200 py-8">
            <div class="hero-content flex-col w-full max-w-lg">
                <div class="text-center mb-2">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Sprout attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Create your account"</h1>
                        <p class="text-base-content/70">"Join Agromod as a farmer or a vendor"</p>
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
                            <label class="label"><span class="label-text">"I am a"</span></label>
                            <div class="join w-full">
                                <button
                                    type="button"
                                    class=move || {
                                        if role.get() == Role::Farmer {
                                            "btn join-item flex-1 btn-primary"
                                        } else {
                                            "btn join-item flex-1"
                                        }
                                    }
                                    on:click=move |_| set_role.set(Role::Farmer)
                                >
                                    "Farmer"
                                </button>
                                <button
                                    type="button"
                                    class=move || {
                                        if role.get() == Role::Vendor {
                                            "btn join-item flex-1 btn-primary"
                                        } else {
                                            "btn join-item flex-1"
                                        }
                                    }
                                    on:click=move |_| set_role.set(Role::Vendor)
                                >
                                    "Vendor"
                                </button>
                            </div>
                        </div>

                        <div class="grid grid-cols-2 gap-2">
                            <div class="form-control">
                                <label class="label"><span class="label-text">"First name"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    on:input=move |ev| set_first_name.set(event_target_value(&ev))
                                    prop:value=first_name
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Last name"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    on:input=move |ev| set_last_name.set(event_target_value(&ev))
                                    prop:value=last_name
                                />
                            </div>
                        </div>

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
                            <label class="label"><span class="label-text">"Password"</span></label>
                            <input
                                type="password"
                                class="input input-bordered"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Phone"</span></label>
                            <input
                                type="tel"
                                class="input input-bordered"
                                on:input=move |ev| set_phone.set(event_target_value(&ev))
                                prop:value=phone
                            />
                        </div>

                        <Show when=move || role.get() == Role::Farmer>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Region"</span></label>
                                <input
                                    type="text"
                                    placeholder="e.g. Punjab"
                                    class="input input-bordered"
                                    on:input=move |ev| set_region.set(event_target_value(&ev))
                                    prop:value=region
                                />
                            </div>
                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"Preferred crops"</span>
                                </label>
                                <input
                                    type="text"
                                    placeholder="e.g. Wheat, Rice"
                                    class="input input-bordered"
                                    on:input=move |ev| set_preferred_crops.set(event_target_value(&ev))
                                    prop:value=preferred_crops
                                />
                            </div>
                        </Show>

                        <Show when=move || role.get() == Role::Vendor>
                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"Business name"</span>
                                </label>
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    on:input=move |ev| set_business_name.set(event_target_value(&ev))
                                    prop:value=business_name
                                />
                            </div>
                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"Contact phone"</span>
                                </label>
                                <input
                                    type="tel"
                                    class="input input-bordered"
                                    on:input=move |ev| set_contact_phone.set(event_target_value(&ev))
                                    prop:value=contact_phone
                                />
                            </div>
                        </Show>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || {
                                    if is_submitting.get() {
                                        view! {
                                            <span class="loading loading-spinner"></span>
                                            "Creating account..."
                                        }
                                            .into_any()
                                    } else {
                                        "Sign up".into_any()
                                    }
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Already have an account? "
                            <a
                                class="link link-primary"
                                on:click=move |_| router.navigate(AppRoute::Login.to_path())
                            >
                                "Log in"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
