//! 个人资料页（只读，数据来自会话身份）

use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::User as UserIcon;

#[component]
fn ProfileRow(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="flex justify-between py-2 border-b border-base-200 last:border-0">
            <span class="text-base-content/60">{label}</span>
            <span class="font-medium">{if value.is_empty() { "—".to_string() } else { value }}</span>
        </div>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-2xl mx-auto space-y-6">
                <div class="flex items-center gap-3">
                    <UserIcon attr:class="h-8 w-8 text-primary" />
                    <h1 class="text-3xl font-bold">"My Profile"</h1>
                </div>

                {move || {
                    auth.state
                        .get()
                        .identity
                        .map(|user| {
                            view! {
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <div class="flex items-center gap-4 mb-4">
                                            <div class="avatar placeholder">
                                                <div class="bg-primary text-primary-content rounded-full w-16">
                                                    <span class="text-2xl">
                                                        {user.display_name().chars().take(1).collect::<String>()}
                                                    </span>
                                                </div>
                                            </div>
                                            <div>
                                                <h2 class="text-xl font-bold">{user.display_name()}</h2>
                                                <span class="badge badge-primary badge-outline">
                                                    {user.role.to_string()}
                                                </span>
                                            </div>
                                        </div>

                                        <ProfileRow label="Email" value=user.email.clone() />
                                        <ProfileRow label="Phone" value=user.phone.clone() />
                                        {user
                                            .farmer_profile
                                            .as_ref()
                                            .map(|profile| {
                                                view! {
                                                    <ProfileRow label="Region" value=profile.region.clone() />
                                                    <ProfileRow
                                                        label="Preferred crops"
                                                        value=profile.preferred_crops.clone()
                                                    />
                                                }
                                            })}
                                        {user
                                            .vendor_profile
                                            .as_ref()
                                            .map(|profile| {
                                                view! {
                                                    <ProfileRow
                                                        label="Business name"
                                                        value=profile.business_name.clone()
                                                    />
                                                    <ProfileRow
                                                        label="Contact phone"
                                                        value=profile.contact_phone.clone()
                                                    />
                                                }
                                            })}
                                    </div>
                                </div>
                            }
                        })
                }}
            </div>
        </div>
    }
}
