use gc_types::timestamps::format_optional_date;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::states::{ErrorBox, Loading};
use crate::hooks::use_subscription;
use crate::query::use_query_client;

/// Landing page after a completed checkout.
#[component]
pub fn SubscribeSuccessPage() -> impl IntoView {
    let query = use_query_map();
    let queries = use_query_client();
    // The payment provider has just changed the subscription server-side.
    queries.invalidate("subscription");
    let subscription = use_subscription();

    let completed = move || match query.with(|q| q.get("session_id")) {
        Some(id) => format!("Thanks! Your payment was completed (session {id})."),
        None => "Thanks! Your payment was completed.".to_string(),
    };

    view! {
        <div class="dashboard-header">
            <h1>"Subscription activated"</h1>
            <p class="subtitle">{completed}</p>
        </div>
        <div class="card">
            {move || match subscription.get() {
                None => view! { <Loading label="Refreshing your subscription..." /> }.into_any(),
                Some(Err(e)) => view! { <ErrorBox message=format!("Could not refresh subscription: {e}") /> }.into_any(),
                Some(Ok(None)) => {
                    view! { <p class="card-text">"Your subscription will appear here shortly."</p> }.into_any()
                }
                Some(Ok(Some(sub))) => {
                    view! {
                        <dl class="detail-list">
                            <dt>"Plan"</dt>
                            <dd>{sub.plan_label().to_string()}</dd>
                            <dt>"Status"</dt>
                            <dd>{sub.status.clone()}</dd>
                            <dt>"Since"</dt>
                            <dd>{format_optional_date(sub.start_date.as_deref())}</dd>
                        </dl>
                    }
                        .into_any()
                }
            }}
            <div class="card-actions">
                <a class="btn btn-primary" href="/wallet">"Go to wallet"</a>
                <a class="btn btn-ghost" href="/settings">"View settings"</a>
            </div>
        </div>
    }
}

#[component]
pub fn SubscribeCancelPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Checkout cancelled"</h1>
            <p class="subtitle">"You were not charged. You can try again any time."</p>
        </div>
        <div class="card-actions">
            <a class="btn btn-primary" href="/settings">"Back to settings"</a>
            <a class="btn btn-ghost" href="/wallet">"Go to wallet"</a>
        </div>
    }
}
