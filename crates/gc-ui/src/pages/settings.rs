use gc_types::timestamps::format_optional_date;
use gc_types::{PlanCode, ProfileUpdate};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::api;
use crate::auth::use_auth;
use crate::components::states::{ErrorBox, Loading};
use crate::components::toast::use_toasts;
use crate::hooks::{after_mutation, spawn_api, use_subscription};
use crate::query::use_query_client;

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Settings"</h1>
            <p class="subtitle">"Account details, plan and membership"</p>
        </div>
        <div class="card-grid">
            <AccountCard />
            <PlanCard />
            <DeleteAccountCard />
        </div>
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[component]
fn AccountCard() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let (name, setName) = signal(String::new());
    let (address, setAddress) = signal(String::new());
    let (saving, setSaving) = signal(false);

    // Keep the form in step with the signed-in user.
    Effect::new(move |_| {
        let user = auth.user();
        setName.set(user.as_ref().and_then(|u| u.full_name.clone()).unwrap_or_default());
        setAddress.set(user.and_then(|u| u.address).unwrap_or_default());
    });

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let update = ProfileUpdate {
            full_name: non_empty(name.get_untracked()),
            address: non_empty(address.get_untracked()),
        };
        setSaving.set(true);
        spawn_api(
            move |client| async move { client.update_profile(&update).await },
            move |result| {
                setSaving.set(false);
                match result {
                    Ok(()) => {
                        auth.refresh();
                        toasts.success("Account details updated");
                    }
                    Err(gc_client::ApiError::Unauthorized) => {}
                    Err(e) => toasts.error(format!("Could not update account: {e}")),
                }
            },
        );
    };

    let onLogout = move |_| {
        auth.logout();
        navigate(
            "/",
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    };

    view! {
        <form class="card" on:submit=onSubmit>
            <div class="card-title">"Account"</div>
            <p class="card-text">
                "Email: " {move || auth.user().map(|u| u.email).unwrap_or_default()}
            </p>
            <div class="form-group">
                <label for="settings-name">"Name"</label>
                <input
                    type="text"
                    id="settings-name"
                    placeholder="Your name"
                    prop:value=move || name.get()
                    on:input=move |ev| setName.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="settings-address">"Address"</label>
                <input
                    type="text"
                    id="settings-address"
                    placeholder="Home address for pickups"
                    prop:value=move || address.get()
                    on:input=move |ev| setAddress.set(event_target_value(&ev))
                />
            </div>
            <div class="card-actions">
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
                <button type="button" class="btn btn-ghost" on:click=onLogout>
                    "Log out"
                </button>
            </div>
        </form>
    }
}

#[component]
fn PlanCard() -> impl IntoView {
    let subscription = use_subscription();

    view! {
        <div class="card">
            <div class="card-title">"Subscription"</div>
            {move || match subscription.get() {
                None => view! { <Loading label="Loading..." /> }.into_any(),
                Some(Err(e)) => view! { <ErrorBox message=format!("Could not load subscription: {e}") /> }.into_any(),
                Some(Ok(Some(sub))) if sub.is_active() => {
                    view! {
                        <dl class="detail-list">
                            <dt>"Plan"</dt>
                            <dd>{sub.plan_label().to_string()}</dd>
                            <dt>"Status"</dt>
                            <dd>{sub.status.clone()}</dd>
                            <dt>"Since"</dt>
                            <dd>{format_optional_date(sub.start_date.as_deref())}</dd>
                            <dt>"Active until"</dt>
                            <dd>{format_optional_date(sub.current_period_end.as_deref())}</dd>
                        </dl>
                        <p class="card-text">"Change plan:"</p>
                        <PlanChooser />
                        <CancelSubscriptionButton />
                    }
                        .into_any()
                }
                Some(Ok(_)) => {
                    view! {
                        <p class="card-text">"Choose a plan to activate your subscription:"</p>
                        <PlanChooser />
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

/// One button per plan. Picking one sends the browser to the hosted
/// checkout page.
#[component]
fn PlanChooser() -> impl IntoView {
    let toasts = use_toasts();
    let (pending, setPending) = signal(Option::<PlanCode>::None);

    let choose = move |plan: PlanCode| {
        setPending.set(Some(plan));
        spawn_api(
            move |client| async move { client.checkout_session(plan).await },
            move |result| match result {
                Ok(session) => api::redirect(&session.url),
                Err(e) => {
                    setPending.set(None);
                    if !matches!(e, gc_client::ApiError::Unauthorized) {
                        toasts.error(format!("Could not start checkout: {e}"));
                    }
                }
            },
        );
    };

    view! {
        <div class="plan-grid">
            {PlanCode::ALL
                .iter()
                .map(|plan| {
                    let plan = *plan;
                    view! {
                        <button
                            type="button"
                            class="plan-option"
                            disabled=move || pending.get().is_some()
                            on:click=move |_| choose(plan)
                        >
                            <div class="plan-title">{plan.title()}</div>
                            <div class="plan-blurb">
                                {move || {
                                    if pending.get() == Some(plan) {
                                        "Redirecting...".to_string()
                                    } else {
                                        plan.blurb().to_string()
                                    }
                                }}
                            </div>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn CancelSubscriptionButton() -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let (busy, setBusy) = signal(false);

    let onCancel = move |_| {
        if !api::confirm("Cancel your subscription? You can resubscribe at any time.") {
            return;
        }
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["subscription"], "Subscription canceled", "Could not cancel subscription");
        spawn_api(
            |client| async move { client.cancel_subscription().await },
            move |result| {
                setBusy.set(false);
                finish(result);
            },
        );
    };

    view! {
        <div class="card-actions">
            <button class="btn btn-ghost" disabled=move || busy.get() on:click=onCancel>
                {move || if busy.get() { "Canceling..." } else { "Cancel subscription" }}
            </button>
        </div>
    }
}

#[component]
fn DeleteAccountCard() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let (deleting, setDeleting) = signal(false);

    let onDelete = move |_| {
        if !api::confirm("Delete your account? This is permanent and cannot be undone.") {
            return;
        }
        setDeleting.set(true);
        let navigate = navigate.clone();
        spawn_api(
            |client| async move { client.delete_account().await },
            move |result| {
                setDeleting.set(false);
                match result {
                    Ok(()) => {
                        auth.logout();
                        navigate(
                            "/",
                            NavigateOptions {
                                replace: true,
                                ..Default::default()
                            },
                        );
                    }
                    Err(gc_client::ApiError::Unauthorized) => {}
                    Err(e) => toasts.error(format!("Could not delete account: {e}")),
                }
            },
        );
    };

    view! {
        <div class="card">
            <div class="card-title">"Delete account"</div>
            <p class="card-text">
                "Deleting your account requires no active subscription and no upcoming collections."
            </p>
            <button class="btn btn-danger" disabled=move || deleting.get() on:click=onDelete>
                {move || if deleting.get() { "Deleting..." } else { "Delete account" }}
            </button>
        </div>
    }
}
