use gc_types::schedule::weekly_rows;
use gc_types::timestamps::format_optional_date;
use gc_types::Subscription;
use leptos::prelude::*;

use crate::api;
use crate::components::states::{ErrorBox, Loading};
use crate::components::status_badge::StatusBadge;
use crate::components::toast::use_toasts;
use crate::hooks::{after_mutation, spawn_api, use_collection_slot, use_subscription};
use crate::query::use_query_client;

#[component]
pub fn SubscriptionsPage() -> impl IntoView {
    let subscription = use_subscription();
    let slot = use_collection_slot();

    view! {
        <div class="dashboard-header">
            <h1>"Subscriptions"</h1>
            <p class="subtitle">"Your subscription controls how often we collect bags from your home."</p>
        </div>
        <div class="card-grid">
            <div class="card">
                <div class="card-title">"Subscription"</div>
                {move || match subscription.get() {
                    None => view! { <Loading label="Loading subscription..." /> }.into_any(),
                    Some(Err(e)) => view! { <ErrorBox message=format!("Could not load subscription: {e}") /> }.into_any(),
                    Some(Ok(None)) => {
                        view! {
                            <p class="card-text">"You don't have a subscription yet."</p>
                            <SubscriptionActions active=false />
                        }
                            .into_any()
                    }
                    Some(Ok(Some(sub))) => view! { <SubscriptionDetails sub=sub /> }.into_any(),
                }}
            </div>
            <div class="card">
                <div class="card-title">"Pickup schedule"</div>
                {move || match slot.get() {
                    None => view! { <Loading label="Loading schedule..." /> }.into_any(),
                    Some(Err(e)) => view! { <ErrorBox message=format!("Could not load schedule: {e}") /> }.into_any(),
                    Some(Ok(current)) => {
                        view! {
                            <ul class="week-grid">
                                {weekly_rows(current.as_ref())
                                    .into_iter()
                                    .map(|(day, window)| {
                                        let active = window.is_some();
                                        view! {
                                            <li class="week-row" class:week-row-active=active>
                                                <span class="week-day">{day}</span>
                                                <span class="week-window">
                                                    {window.unwrap_or_else(|| "No pickup".to_string())}
                                                </span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                            <a class="btn btn-ghost btn-sm" href="/collections">"Edit schedule"</a>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn SubscriptionDetails(sub: Subscription) -> impl IntoView {
    let active = sub.is_active();
    view! {
        <dl class="detail-list">
            <dt>"Status"</dt>
            <dd><StatusBadge status=sub.status.clone() /></dd>
            <dt>"Plan"</dt>
            <dd>{sub.plan_label().to_string()}</dd>
            <dt>"Start"</dt>
            <dd>{format_optional_date(sub.start_date.as_deref())}</dd>
            <dt>"End"</dt>
            <dd>{format_optional_date(sub.end_date.as_deref())}</dd>
            <dt>"Paid until"</dt>
            <dd>{format_optional_date(sub.current_period_end.as_deref())}</dd>
        </dl>
        <SubscriptionActions active=active />
    }
}

#[component]
fn SubscriptionActions(active: bool) -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let (busy, setBusy) = signal(false);

    let onActivate = move |_| {
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["subscription"], "Subscription activated", "Could not activate subscription");
        spawn_api(
            |client| async move { client.activate_subscription().await },
            move |result| {
                setBusy.set(false);
                finish(result);
            },
        );
    };
    let onCancel = move |_| {
        if !api::confirm("Cancel your subscription? Pickups continue until the end of the paid period.") {
            return;
        }
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["subscription"], "Subscription cancelled", "Could not cancel subscription");
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
            {if active {
                view! {
                    <button class="btn btn-ghost" disabled=move || busy.get() on:click=onCancel>
                        "Cancel subscription"
                    </button>
                }
                    .into_any()
            } else {
                view! {
                    <button class="btn btn-primary" disabled=move || busy.get() on:click=onActivate>
                        "Activate subscription"
                    </button>
                }
                    .into_any()
            }}
        </div>
    }
}
