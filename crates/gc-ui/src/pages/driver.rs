use gc_types::money::format_cents;
use gc_types::timestamps::format_timestamp;
use gc_types::{DriverCollection, DriverFilter, DriverProfile, DriverProfileUpdate, MarkCollectedRequest};
use leptos::prelude::*;

use crate::components::metric_card::MetricCard;
use crate::components::states::{Empty, ErrorBox, Loading};
use crate::components::status_badge::StatusBadge;
use crate::components::toast::use_toasts;
use crate::hooks::{
    after_mutation, return_point_name, spawn_api, use_driver_collections, use_driver_earnings,
    use_driver_payouts, use_driver_profile, use_return_points,
};
use crate::query::use_query_client;

#[component]
pub fn DriverPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Driver dashboard"</h1>
            <p class="subtitle">"Your profile, assigned pickups and earnings"</p>
        </div>
        <ProfileSection />
        <CollectionsSection />
        <EarningsSection />
    }
}

#[component]
fn ProfileSection() -> impl IntoView {
    let profile = use_driver_profile();
    let (editing, setEditing) = signal(false);

    view! {
        <div class="card">
            <div class="card-title">"My profile"</div>
            {move || match profile.get() {
                None => view! { <Loading label="Loading profile..." /> }.into_any(),
                Some(Err(e)) => view! { <ErrorBox message=format!("Failed to load profile: {e}") /> }.into_any(),
                Some(Ok(p)) if editing.get() => {
                    view! { <ProfileForm profile=p on_done=move || setEditing.set(false) /> }.into_any()
                }
                Some(Ok(p)) => {
                    view! {
                        <ProfileDetails profile=p />
                        <div class="card-actions">
                            <button class="btn btn-ghost btn-sm" on:click=move |_| setEditing.set(true)>
                                "Edit"
                            </button>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

fn or_not_set(value: Option<String>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or_else(|| "Not set".to_string())
}

#[component]
fn ProfileDetails(profile: DriverProfile) -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let (busy, setBusy) = signal(false);

    let available = profile.is_available;
    let availability = if available { "available" } else { "unavailable" };
    let toggle = DriverProfileUpdate {
        vehicle_type: profile.vehicle_type.clone(),
        vehicle_plate: profile.vehicle_plate.clone(),
        phone: profile.phone.clone(),
        is_available: Some(!available),
    };
    let onToggle = move |_| {
        let update = toggle.clone();
        setBusy.set(true);
        let success = if available { "You are now unavailable" } else { "You are now available" };
        let finish = after_mutation(toasts, queries, &["driver"], success, "Failed to update availability");
        spawn_api(
            move |client| async move { client.update_driver_profile(&update).await },
            move |result| {
                setBusy.set(false);
                finish(result);
            },
        );
    };

    view! {
        <dl class="detail-list">
            <dt>"Vehicle type"</dt>
            <dd>{or_not_set(profile.vehicle_type.clone())}</dd>
            <dt>"Vehicle plate"</dt>
            <dd>{or_not_set(profile.vehicle_plate.clone())}</dd>
            <dt>"Phone"</dt>
            <dd>{or_not_set(profile.phone.clone())}</dd>
            <dt>"Availability"</dt>
            <dd>
                <StatusBadge status=availability />
                <button class="btn btn-ghost btn-sm" disabled=move || busy.get() on:click=onToggle>
                    {if available { "Go offline" } else { "Go online" }}
                </button>
            </dd>
        </dl>
    }
}

#[component]
fn ProfileForm<F>(profile: DriverProfile, on_done: F) -> impl IntoView
where
    F: Fn() + Copy + Send + Sync + 'static,
{
    let toasts = use_toasts();
    let queries = use_query_client();
    let (vehicleType, setVehicleType) = signal(profile.vehicle_type.unwrap_or_default());
    let (vehiclePlate, setVehiclePlate) = signal(profile.vehicle_plate.unwrap_or_default());
    let (phone, setPhone) = signal(profile.phone.unwrap_or_default());
    let (busy, setBusy) = signal(false);

    let onSave = move |_| {
        let update = DriverProfileUpdate::from_form(
            &vehicleType.get_untracked(),
            &vehiclePlate.get_untracked(),
            &phone.get_untracked(),
        );
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["driver"], "Profile updated", "Failed to update profile");
        spawn_api(
            move |client| async move { client.update_driver_profile(&update).await },
            move |result| {
                setBusy.set(false);
                if result.is_ok() {
                    on_done();
                }
                finish(result);
            },
        );
    };

    view! {
        <div class="form-row">
            <div class="form-group">
                <label for="driver-vehicle">"Vehicle type"</label>
                <input
                    id="driver-vehicle"
                    placeholder="e.g. Van"
                    prop:value=move || vehicleType.get()
                    on:input=move |ev| setVehicleType.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="driver-plate">"Vehicle plate"</label>
                <input
                    id="driver-plate"
                    placeholder="e.g. 231-D-12345"
                    prop:value=move || vehiclePlate.get()
                    on:input=move |ev| setVehiclePlate.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="driver-phone">"Phone"</label>
                <input
                    id="driver-phone"
                    placeholder="e.g. 087 123 4567"
                    prop:value=move || phone.get()
                    on:input=move |ev| setPhone.set(event_target_value(&ev))
                />
            </div>
        </div>
        <div class="card-actions">
            <button class="btn btn-primary btn-sm" disabled=move || busy.get() on:click=onSave>
                "Save"
            </button>
            <button class="btn btn-ghost btn-sm" on:click=move |_| on_done()>
                "Cancel"
            </button>
        </div>
    }
}

#[component]
fn CollectionsSection() -> impl IntoView {
    let (filter, setFilter) = signal(DriverFilter::All);
    let collections = use_driver_collections(filter);
    let points = use_return_points();
    let (marking, setMarking) = signal(Option::<i64>::None);

    view! {
        <div class="section-header">
            <h2 class="section-title">"My collections"</h2>
            <select
                prop:value=move || filter.get().as_query().unwrap_or("all")
                on:change=move |ev| setFilter.set(DriverFilter::parse(&event_target_value(&ev)))
            >
                <option value="all">"All"</option>
                <option value="assigned">"Assigned"</option>
                <option value="collected">"Collected"</option>
            </select>
        </div>
        {move || marking.get().map(|id| view! { <MarkCollectedPanel id=id on_close=move || setMarking.set(None) /> })}
        {move || match collections.get() {
            None => view! { <Loading label="Loading collections..." /> }.into_any(),
            Some(Err(e)) => view! { <ErrorBox message=format!("Failed to load collections: {e}") /> }.into_any(),
            Some(Ok(list)) if list.is_empty() => view! { <Empty message="No collections found." /> }.into_any(),
            Some(Ok(list)) => {
                let names = points.with(|p| match p {
                    Some(Ok(p)) => p.items.clone(),
                    _ => Vec::new(),
                });
                view! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Scheduled"</th>
                                <th>"Return point"</th>
                                <th class="num">"Bags"</th>
                                <th>"Status"</th>
                                <th>"Proof"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|c| {
                                    let name = return_point_name(&names, c.return_point_id);
                                    collection_row(c, name, setMarking)
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                    .into_any()
            }
        }}
    }
}

fn collection_row(c: DriverCollection, pointName: String, setMarking: WriteSignal<Option<i64>>) -> impl IntoView {
    let id = c.id;
    let assigned = c.status_is("assigned");
    view! {
        <tr>
            <td>{id}</td>
            <td>{format_timestamp(&c.scheduled_at)}</td>
            <td>{pointName}</td>
            <td class="num">{c.bag_count.unwrap_or(0)}</td>
            <td><StatusBadge status=c.status.clone() /></td>
            <td>
                {match c.proof_url.clone() {
                    Some(url) => view! { <a href=url target="_blank" rel="noreferrer">"View"</a> }.into_any(),
                    None => view! { <span class="muted">"None"</span> }.into_any(),
                }}
            </td>
            <td>
                {assigned.then(|| view! {
                    <button class="btn btn-primary btn-sm" on:click=move |_| setMarking.set(Some(id))>
                        "Mark collected"
                    </button>
                })}
            </td>
        </tr>
    }
}

#[component]
fn MarkCollectedPanel<F>(id: i64, on_close: F) -> impl IntoView
where
    F: Fn() + Copy + Send + Sync + 'static,
{
    let toasts = use_toasts();
    let queries = use_query_client();
    let (proofUrl, setProofUrl) = signal(String::new());
    let (busy, setBusy) = signal(false);

    let onConfirm = move |_| {
        let request = MarkCollectedRequest::from_form(&proofUrl.get_untracked());
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["driver"], "Collection marked as collected", "Failed to mark collected");
        spawn_api(
            move |client| async move { client.mark_collected(id, &request).await },
            move |result| {
                setBusy.set(false);
                if result.is_ok() {
                    on_close();
                }
                finish(result);
            },
        );
    };

    view! {
        <div class="card">
            <div class="card-title">{format!("Mark collection #{id} as collected")}</div>
            <div class="form-group">
                <label for="proof-url">"Proof URL (optional)"</label>
                <input
                    type="url"
                    id="proof-url"
                    placeholder="https://example.com/proof-photo.jpg"
                    prop:value=move || proofUrl.get()
                    on:input=move |ev| setProofUrl.set(event_target_value(&ev))
                />
            </div>
            <div class="card-actions">
                <button class="btn btn-primary btn-sm" disabled=move || busy.get() on:click=onConfirm>
                    {move || if busy.get() { "Submitting..." } else { "Confirm" }}
                </button>
                <button class="btn btn-ghost btn-sm" disabled=move || busy.get() on:click=move |_| on_close()>
                    "Cancel"
                </button>
            </div>
        </div>
    }
}

#[component]
fn EarningsSection() -> impl IntoView {
    let earnings = use_driver_earnings();
    let payouts = use_driver_payouts();

    view! {
        <h2 class="section-title">"Earnings"</h2>
        <div class="card-grid">
            {move || match earnings.get() {
                None => view! { <Loading label="Loading earnings..." /> }.into_any(),
                Some(Err(e)) => view! { <ErrorBox message=format!("Failed to load earnings: {e}") /> }.into_any(),
                Some(Ok(balance)) => {
                    let count = balance.earnings.len();
                    view! {
                        <MetricCard
                            title="Balance"
                            value=format_cents(balance.balance_cents)
                            hint=format!("{count} paid pickups")
                        >
                            <ul class="item-list">
                                {balance
                                    .earnings
                                    .into_iter()
                                    .map(|e| {
                                        let when = e.created_at.as_deref().map(format_timestamp).unwrap_or_default();
                                        view! {
                                            <li class="item-row">
                                                <span>{format!("Collection #{}", e.collection_id)}</span>
                                                <span class="item-meta">{when}</span>
                                                <span class="num credit">{format_cents(e.amount_cents)}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        </MetricCard>
                    }
                        .into_any()
                }
            }}
            <div class="card">
                <div class="card-title">"Payouts"</div>
                {move || match payouts.get() {
                    None => view! { <Loading label="Loading payouts..." /> }.into_any(),
                    Some(Err(e)) => view! { <ErrorBox message=format!("Failed to load payouts: {e}") /> }.into_any(),
                    Some(Ok(list)) if list.is_empty() => view! { <Empty message="No payouts yet." /> }.into_any(),
                    Some(Ok(list)) => {
                        view! {
                            <ul class="item-list">
                                {list
                                    .into_iter()
                                    .map(|p| {
                                        let when = p.created_at.as_deref().map(format_timestamp).unwrap_or_default();
                                        view! {
                                            <li class="item-row">
                                                <span>{p.note.unwrap_or_else(|| "Payout".to_string())}</span>
                                                <span class="item-meta">{when}</span>
                                                <span class="num">{format_cents(p.amount_cents)}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}
