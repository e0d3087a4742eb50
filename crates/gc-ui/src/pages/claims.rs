use gc_types::timestamps::format_timestamp;
use gc_types::{Claim, ClaimRequest};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::states::{Empty, ErrorBox, Loading};
use crate::components::status_badge::StatusBadge;
use crate::components::toast::use_toasts;
use crate::hooks::{after_mutation, spawn_api, use_claims};
use crate::query::use_query_client;

#[component]
pub fn ClaimsPage() -> impl IntoView {
    let claims = use_claims();

    view! {
        <div class="dashboard-header">
            <h1>"Claims"</h1>
            <p class="subtitle">"Report a missing refund or a problem with a collection"</p>
        </div>
        <ClaimForm />
        <h2 class="section-title">"Your claims"</h2>
        {move || match claims.get() {
            None => view! { <Loading label="Loading claims..." /> }.into_any(),
            Some(Err(e)) => view! { <ErrorBox message=format!("Could not load your claims: {e}") /> }.into_any(),
            Some(Ok(list)) if list.is_empty() => view! { <Empty message="You have not submitted any claims." /> }.into_any(),
            Some(Ok(list)) => {
                view! {
                    <ul class="item-list">
                        {list.into_iter().map(claim_row).collect_view()}
                    </ul>
                }
                    .into_any()
            }
        }}
    }
}

fn claim_row(claim: Claim) -> impl IntoView {
    let submitted = claim.created_at.as_deref().map(format_timestamp).unwrap_or_default();
    view! {
        <li class="item-row">
            <div class="item-main">
                <div class="item-title">{claim.description.clone()}</div>
                <div class="item-meta">{submitted}</div>
                {claim.image_url.clone().map(|url| view! {
                    <a class="item-meta" href=url target="_blank" rel="noreferrer">"View image"</a>
                })}
                {claim.admin_response.clone().map(|response| view! {
                    <div class="item-response">"Response: " {response}</div>
                })}
            </div>
            <StatusBadge status=claim.status.clone() />
        </li>
    }
}

#[component]
fn ClaimForm() -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let (description, setDescription) = signal(String::new());
    let (imageUrl, setImageUrl) = signal(String::new());
    let (busy, setBusy) = signal(false);

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(request) = ClaimRequest::from_form(&description.get_untracked(), &imageUrl.get_untracked()) else {
            toasts.error("Please describe the problem.");
            return;
        };
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["claims"], "Claim submitted", "Could not submit claim");
        spawn_api(
            move |client| async move { client.submit_claim(&request).await },
            move |result| {
                if result.is_ok() {
                    setDescription.set(String::new());
                    setImageUrl.set(String::new());
                }
                setBusy.set(false);
                finish(result);
            },
        );
    };

    view! {
        <form class="card" on:submit=onSubmit>
            <div class="card-title">"New claim"</div>
            <div class="form-group">
                <label for="claim-description">"What happened?"</label>
                <textarea
                    id="claim-description"
                    required
                    prop:value=move || description.get()
                    on:input=move |ev| setDescription.set(event_target_value(&ev))
                ></textarea>
            </div>
            <div class="form-group">
                <label for="claim-image">"Image URL (optional)"</label>
                <input
                    type="url"
                    id="claim-image"
                    placeholder="https://example.com/receipt.jpg"
                    prop:value=move || imageUrl.get()
                    on:input=move |ev| setImageUrl.set(event_target_value(&ev))
                />
            </div>
            <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                {move || if busy.get() { "Submitting..." } else { "Submit claim" }}
            </button>
        </form>
    }
}
