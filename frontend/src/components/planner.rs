//! 种植规划页
//!
//! 计划列表 + 新建计划；选中计划后管理其农事活动与提醒。

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::{Calendar, Plus};
use agromod_shared::protocol::{CreateActivityRequest, CreatePlanRequest};
use agromod_shared::{CropPlan, PlanActivity};

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

#[component]
pub fn PlannerPage() -> impl IntoView {
    let api = use_api();

    let (plans, set_plans) = signal(Vec::<CropPlan>::new());
    let (selected, set_selected) = signal(Option::<u64>::None);
    let (activities, set_activities) = signal(Vec::<PlanActivity>::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 新建计划表单
    let (plan_name, set_plan_name) = signal(String::new());
    let (plan_crop, set_plan_crop) = signal(String::new());
    let (start_date, set_start_date) = signal(String::new());
    let (end_date, set_end_date) = signal(String::new());

    // 新建活动表单
    let (activity_name, set_activity_name) = signal(String::new());
    let (due_date, set_due_date) = signal(String::new());
    let (reminder_days, set_reminder_days) = signal("3".to_string());

    let load_plans = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                match api.plans().await {
                    Ok(listing) => set_plans.set(listing.into_vec()),
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
            });
        }
    };

    {
        let load_plans = load_plans.clone();
        Effect::new(move |_| load_plans());
    }

    // 选中计划变化时加载其活动
    Effect::new({
        let api = api.clone();
        move |_| {
            let Some(plan_id) = selected.get() else {
                set_activities.set(Vec::new());
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                match api.activities(Some(plan_id)).await {
                    Ok(listing) => set_activities.set(listing.into_vec()),
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
            });
        }
    });

    let on_create_plan = {
        let api = api.clone();
        let load_plans = load_plans.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let (Some(start), Some(end)) = (
                parse_date(&start_date.get_untracked()),
                parse_date(&end_date.get_untracked()),
            ) else {
                set_error_msg.set(Some("Start and end dates are required".to_string()));
                return;
            };
            if end < start {
                set_error_msg.set(Some("End date must be after the start date".to_string()));
                return;
            }

            let request = CreatePlanRequest {
                name: plan_name.get_untracked(),
                crop: plan_crop.get_untracked(),
                start_date: start,
                end_date: end,
                notes: String::new(),
            };

            let api = api.clone();
            let load_plans = load_plans.clone();
            spawn_local(async move {
                match api.create_plan(&request).await {
                    Ok(_) => {
                        set_plan_name.set(String::new());
                        set_plan_crop.set(String::new());
                        load_plans();
                    }
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
            });
        }
    };

    let on_create_activity = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(plan_id) = selected.get_untracked() else {
                return;
            };
            let Some(due) = parse_date(&due_date.get_untracked()) else {
                set_error_msg.set(Some("A due date is required".to_string()));
                return;
            };

            let request = CreateActivityRequest {
                plan: plan_id,
                name: activity_name.get_untracked(),
                due_date: due,
                reminder_days_before: reminder_days.get_untracked().parse().unwrap_or(3),
                notes: String::new(),
            };

            let api = api.clone();
            spawn_local(async move {
                match api.create_activity(&request).await {
                    Ok(activity) => {
                        set_activity_name.set(String::new());
                        set_activities.update(|list| list.push(activity));
                    }
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-6">
                <div class="flex items-center gap-3">
                    <Calendar attr:class="h-8 w-8 text-primary" />
                    <h1 class="text-3xl font-bold">"Crop Planner"</h1>
                </div>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h2 class="card-title">"My plans"</h2>
                            <ul class="menu bg-base-200 rounded-box">
                                <Show when=move || plans.get().is_empty()>
                                    <li class="p-4 text-base-content/50">"No plans yet."</li>
                                </Show>
                                <For
                                    each=move || plans.get()
                                    key=|plan| plan.id
                                    children=move |plan| {
                                        let plan_id = plan.id;
                                        view! {
                                            <li>
                                                <a
                                                    class=move || {
                                                        if selected.get() == Some(plan_id) { "active" } else { "" }
                                                    }
                                                    on:click=move |_| set_selected.set(Some(plan_id))
                                                >
                                                    <span class="font-semibold">{plan.name.clone()}</span>
                                                    <span class="badge badge-ghost">{plan.crop.clone()}</span>
                                                    <span class="text-xs opacity-60">
                                                        {format!("{} → {}", plan.start_date, plan.end_date)}
                                                    </span>
                                                </a>
                                            </li>
                                        }
                                    }
                                />
                            </ul>

                            <form class="space-y-2 mt-4" on:submit=on_create_plan>
                                <h3 class="font-semibold">"New plan"</h3>
                                <input
                                    type="text"
                                    placeholder="Plan name"
                                    class="input input-bordered w-full"
                                    on:input=move |ev| set_plan_name.set(event_target_value(&ev))
                                    prop:value=plan_name
                                    required
                                />
                                <input
                                    type="text"
                                    placeholder="Crop"
                                    class="input input-bordered w-full"
                                    on:input=move |ev| set_plan_crop.set(event_target_value(&ev))
                                    prop:value=plan_crop
                                />
                                <div class="grid grid-cols-2 gap-2">
                                    <input
                                        type="date"
                                        class="input input-bordered"
                                        on:input=move |ev| set_start_date.set(event_target_value(&ev))
                                        prop:value=start_date
                                        required
                                    />
                                    <input
                                        type="date"
                                        class="input input-bordered"
                                        on:input=move |ev| set_end_date.set(event_target_value(&ev))
                                        prop:value=end_date
                                        required
                                    />
                                </div>
                                <button class="btn btn-primary w-full gap-2">
                                    <Plus attr:class="h-4 w-4" />
                                    "Create plan"
                                </button>
                            </form>
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h2 class="card-title">"Activities"</h2>
                            <Show
                                when=move || selected.get().is_some()
                                fallback=|| {
                                    view! {
                                        <p class="text-base-content/50 py-4">
                                            "Select a plan to see its activities."
                                        </p>
                                    }
                                }
                            >
                                <ul class="space-y-2">
                                    <Show when=move || activities.get().is_empty()>
                                        <li class="text-base-content/50">"No activities yet."</li>
                                    </Show>
                                    <For
                                        each=move || activities.get()
                                        key=|activity| activity.id
                                        children=|activity| {
                                            view! {
                                                <li class="p-3 rounded-lg bg-base-200 flex justify-between">
                                                    <span>{activity.name.clone()}</span>
                                                    <span class="text-sm opacity-60">
                                                        {format!(
                                                            "due {} (remind {}d before)",
                                                            activity.due_date,
                                                            activity.reminder_days_before,
                                                        )}
                                                    </span>
                                                </li>
                                            }
                                        }
                                    />
                                </ul>

                                <form class="space-y-2 mt-4" on:submit=on_create_activity.clone()>
                                    <h3 class="font-semibold">"New activity"</h3>
                                    <input
                                        type="text"
                                        placeholder="e.g. Sowing, Irrigation"
                                        class="input input-bordered w-full"
                                        on:input=move |ev| set_activity_name.set(event_target_value(&ev))
                                        prop:value=activity_name
                                        required
                                    />
                                    <div class="grid grid-cols-2 gap-2">
                                        <input
                                            type="date"
                                            class="input input-bordered"
                                            on:input=move |ev| set_due_date.set(event_target_value(&ev))
                                            prop:value=due_date
                                            required
                                        />
                                        <input
                                            type="number"
                                            min="0"
                                            placeholder="Remind days before"
                                            class="input input-bordered"
                                            on:input=move |ev| set_reminder_days.set(event_target_value(&ev))
                                            prop:value=reminder_days
                                        />
                                    </div>
                                    <button class="btn btn-primary w-full gap-2">
                                        <Plus attr:class="h-4 w-4" />
                                        "Add activity"
                                    </button>
                                </form>
                            </Show>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
