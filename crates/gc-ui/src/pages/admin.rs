use gc_types::money::{format_cents, parse_euros};
use gc_types::timestamps::format_timestamp;
use gc_types::{
    AdminClaimReview, AdminCollection, AdminDriver, AdminNotificationRequest, AdminPayoutRequest,
    Claim, NewDriver,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::metric_card::MetricCard;
use crate::components::states::{Empty, ErrorBox, Loading};
use crate::components::status_badge::StatusBadge;
use crate::components::toast::use_toasts;
use crate::hooks::{
    after_mutation, spawn_api, use_admin_claims, use_admin_collections, use_admin_drivers,
    use_admin_metrics, use_admin_payouts,
};
use crate::query::{use_query_client, QueryState};

const COLLECTION_STATUSES: &[(&str, &str)] = &[
    ("", "All"),
    ("scheduled", "Scheduled"),
    ("assigned", "Assigned"),
    ("collected", "Collected"),
    ("processed", "Processed"),
    ("canceled", "Canceled"),
];

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Admin"</h1>
            <p class="subtitle">"Collections, drivers, payouts and claims"</p>
        </div>
        <Metrics />
        <CollectionsSection />
        <div class="card-grid">
            <DriversSection />
            <PayoutsSection />
        </div>
        <ClaimsSection />
        <BroadcastForm />
    }
}

#[component]
fn Metrics() -> impl IntoView {
    let metrics = use_admin_metrics();

    view! {
        {move || match metrics.get() {
            None => view! { <Loading label="Loading metrics..." /> }.into_any(),
            Some(Err(e)) => view! { <ErrorBox message=format!("Could not load metrics: {e}") /> }.into_any(),
            Some(Ok(m)) => {
                view! {
                    <div class="card-grid">
                        <MetricCard title="Users" value=m.users_total.to_string() />
                        <MetricCard title="Active subscriptions" value=m.active_subscriptions.to_string() />
                        <MetricCard
                            title="Collections"
                            value=m.collections_total.to_string()
                            hint=format!("{} scheduled", m.collections_scheduled)
                        />
                        <MetricCard title="Vouchers issued" value=format_cents(m.voucher_total_cents) />
                    </div>
                }
                    .into_any()
            }
        }}
    }
}

fn driver_list(drivers: ReadSignal<QueryState<Vec<AdminDriver>>>) -> Vec<AdminDriver> {
    drivers.with(|d| match d {
        Some(Ok(d)) => d.clone(),
        _ => Vec::new(),
    })
}

#[component]
fn CollectionsSection() -> impl IntoView {
    let (status, setStatus) = signal(String::new());
    let collections = use_admin_collections(status);
    let drivers = use_admin_drivers();

    view! {
        <div class="section-header">
            <h2 class="section-title">"Collections"</h2>
            <select prop:value=move || status.get() on:change=move |ev| setStatus.set(event_target_value(&ev))>
                {COLLECTION_STATUSES
                    .iter()
                    .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                    .collect_view()}
            </select>
        </div>
        {move || match collections.get() {
            None => view! { <Loading label="Loading collections..." /> }.into_any(),
            Some(Err(e)) => view! { <ErrorBox message=format!("Could not load collections: {e}") /> }.into_any(),
            Some(Ok(list)) if list.is_empty() => view! { <Empty message="No collections match this filter." /> }.into_any(),
            Some(Ok(list)) => {
                let drivers = driver_list(drivers);
                view! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"User"</th>
                                <th>"Scheduled"</th>
                                <th class="num">"Bags"</th>
                                <th>"Status"</th>
                                <th>"Driver"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|c| view! { <AdminCollectionRow item=c drivers=drivers.clone() /> })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                    .into_any()
            }
        }}
    }
}

#[component]
fn AdminCollectionRow(item: AdminCollection, drivers: Vec<AdminDriver>) -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let id = item.id;
    let (driverId, setDriverId) = signal(item.driver_id.map(|d| d.to_string()).unwrap_or_default());

    let onAssign = move |_| {
        let Ok(driver) = driverId.get_untracked().parse::<i64>() else {
            toasts.warning("Pick a driver first.");
            return;
        };
        spawn_api(
            move |client| async move { client.assign_driver(id, driver).await },
            after_mutation(toasts, queries, &["admin"], "Driver assigned", "Could not assign driver"),
        );
    };
    let onProcess = move |_| {
        spawn_api(
            move |client| async move { client.process_collection(id).await },
            after_mutation(toasts, queries, &["admin"], "Collection processed", "Could not process collection"),
        );
    };

    let driverCell = if item.can_assign() {
        let options = drivers
            .into_iter()
            .map(|d| view! { <option value=d.id.to_string()>{d.label()}</option> })
            .collect_view();
        view! {
            <select prop:value=move || driverId.get() on:change=move |ev| setDriverId.set(event_target_value(&ev))>
                <option value="">"-"</option>
                {options}
            </select>
            <button class="btn btn-ghost btn-sm" on:click=onAssign>"Assign"</button>
        }
            .into_any()
    } else {
        let label = item.driver_id.map(|d| format!("#{d}")).unwrap_or_else(|| "-".into());
        view! { <span>{label}</span> }.into_any()
    };

    view! {
        <tr>
            <td>{id}</td>
            <td>{format!("#{}", item.user_id)}</td>
            <td>{format_timestamp(&item.scheduled_at)}</td>
            <td class="num">{item.bag_count}</td>
            <td><StatusBadge status=item.status.clone() /></td>
            <td>{driverCell}</td>
            <td>
                {item.can_process().then(|| view! {
                    <button class="btn btn-primary btn-sm" on:click=onProcess>"Mark processed"</button>
                })}
            </td>
        </tr>
    }
}

#[component]
fn DriversSection() -> impl IntoView {
    let drivers = use_admin_drivers();

    view! {
        <div class="card">
            <div class="card-title">"Drivers"</div>
            {move || match drivers.get() {
                None => view! { <Loading label="Loading drivers..." /> }.into_any(),
                Some(Err(e)) => view! { <ErrorBox message=format!("Could not load drivers: {e}") /> }.into_any(),
                Some(Ok(list)) if list.is_empty() => view! { <Empty message="No drivers yet." /> }.into_any(),
                Some(Ok(list)) => {
                    view! {
                        <ul class="item-list">
                            {list
                                .into_iter()
                                .map(|d| {
                                    let availability = if d.is_available { "available" } else { "unavailable" };
                                    view! {
                                        <li class="item-row">
                                            <div class="item-main">
                                                <div class="item-title">{d.label()}</div>
                                                <div class="item-meta">{d.phone.clone().unwrap_or_default()}</div>
                                            </div>
                                            <StatusBadge status=availability />
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }}
            <NewDriverForm />
        </div>
    }
}

#[component]
fn NewDriverForm() -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let (email, setEmail) = signal(String::new());
    let (password, setPassword) = signal(String::new());
    let (fullName, setFullName) = signal(String::new());
    let (vehicleType, setVehicleType) = signal(String::new());
    let (vehiclePlate, setVehiclePlate) = signal(String::new());
    let (phone, setPhone) = signal(String::new());
    let (busy, setBusy) = signal(false);

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(driver) = NewDriver::from_form(
            &email.get_untracked(),
            &password.get_untracked(),
            &fullName.get_untracked(),
            &vehicleType.get_untracked(),
            &vehiclePlate.get_untracked(),
            &phone.get_untracked(),
        ) else {
            toasts.error("An email and a password of at least 6 characters are required.");
            return;
        };
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["admin"], "Driver created", "Could not create driver");
        spawn_api(
            move |client| async move { client.create_driver(&driver).await },
            move |result| {
                if result.is_ok() {
                    for set in [setEmail, setPassword, setFullName, setVehicleType, setVehiclePlate, setPhone] {
                        set.set(String::new());
                    }
                }
                setBusy.set(false);
                finish(result);
            },
        );
    };

    let field = move |id: &'static str, label: &'static str, kind: &'static str, value: ReadSignal<String>, set: WriteSignal<String>| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    type=kind
                    id=id
                    prop:value=move || value.get()
                    on:input=move |ev| set.set(event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <form on:submit=onSubmit>
            <div class="card-subtitle">"Add a driver"</div>
            {field("driver-email", "Email", "email", email, setEmail)}
            {field("driver-password", "Password", "password", password, setPassword)}
            {field("driver-name", "Full name", "text", fullName, setFullName)}
            {field("driver-vehicle-type", "Vehicle type", "text", vehicleType, setVehicleType)}
            {field("driver-vehicle-plate", "Vehicle plate", "text", vehiclePlate, setVehiclePlate)}
            {field("driver-phone", "Phone", "tel", phone, setPhone)}
            <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                {move || if busy.get() { "Creating..." } else { "Create driver" }}
            </button>
        </form>
    }
}

#[component]
fn PayoutsSection() -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let payouts = use_admin_payouts();
    let drivers = use_admin_drivers();

    let (driverId, setDriverId) = signal(String::new());
    let (amount, setAmount) = signal(String::new());
    let (note, setNote) = signal(String::new());
    let (busy, setBusy) = signal(false);

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Ok(driver) = driverId.get_untracked().parse::<i64>() else {
            toasts.error("Pick a driver.");
            return;
        };
        let Some(cents) = parse_euros(&amount.get_untracked()) else {
            toasts.error("Enter a positive amount, e.g. 12.50.");
            return;
        };
        let note = note.get_untracked();
        let request = AdminPayoutRequest {
            driver_id: driver,
            amount_cents: cents,
            note: (!note.trim().is_empty()).then(|| note.trim().to_string()),
        };
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["admin"], "Payout recorded", "Could not record payout");
        spawn_api(
            move |client| async move { client.create_payout(&request).await },
            move |result| {
                if result.is_ok() {
                    setAmount.set(String::new());
                    setNote.set(String::new());
                }
                setBusy.set(false);
                finish(result);
            },
        );
    };

    view! {
        <div class="card">
            <div class="card-title">"Payouts"</div>
            {move || match payouts.get() {
                None => view! { <Loading label="Loading payouts..." /> }.into_any(),
                Some(Err(e)) => view! { <ErrorBox message=format!("Could not load payouts: {e}") /> }.into_any(),
                Some(Ok(list)) if list.is_empty() => view! { <Empty message="No payouts recorded." /> }.into_any(),
                Some(Ok(list)) => {
                    view! {
                        <ul class="item-list">
                            {list
                                .into_iter()
                                .map(|p| {
                                    let meta = format!(
                                        "Driver #{} • {}",
                                        p.driver_id,
                                        p.created_at.as_deref().map(format_timestamp).unwrap_or_default()
                                    );
                                    view! {
                                        <li class="item-row">
                                            <div class="item-main">
                                                <div class="item-title">{p.note.unwrap_or_else(|| "Payout".into())}</div>
                                                <div class="item-meta">{meta}</div>
                                            </div>
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
            <form on:submit=onSubmit>
                <div class="card-subtitle">"Record a payout"</div>
                <div class="form-group">
                    <label for="payout-driver">"Driver"</label>
                    <select
                        id="payout-driver"
                        prop:value=move || driverId.get()
                        on:change=move |ev| setDriverId.set(event_target_value(&ev))
                    >
                        <option value="">"-"</option>
                        {move || {
                            driver_list(drivers)
                                .into_iter()
                                .map(|d| view! { <option value=d.id.to_string()>{d.label()}</option> })
                                .collect_view()
                        }}
                    </select>
                </div>
                <div class="form-group">
                    <label for="payout-amount">"Amount (€)"</label>
                    <input
                        type="text"
                        id="payout-amount"
                        inputmode="decimal"
                        prop:value=move || amount.get()
                        on:input=move |ev| setAmount.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="payout-note">"Note"</label>
                    <input
                        type="text"
                        id="payout-note"
                        prop:value=move || note.get()
                        on:input=move |ev| setNote.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                    "Record payout"
                </button>
            </form>
        </div>
    }
}

#[component]
fn ClaimsSection() -> impl IntoView {
    let claims = use_admin_claims();

    view! {
        <h2 class="section-title">"Claims"</h2>
        {move || match claims.get() {
            None => view! { <Loading label="Loading claims..." /> }.into_any(),
            Some(Err(e)) => view! { <ErrorBox message=format!("Could not load claims: {e}") /> }.into_any(),
            Some(Ok(list)) if list.is_empty() => view! { <Empty message="No claims to review." /> }.into_any(),
            Some(Ok(list)) => {
                view! {
                    <ul class="item-list">
                        {list.into_iter().map(|c| view! { <ClaimReviewRow claim=c /> }).collect_view()}
                    </ul>
                }
                    .into_any()
            }
        }}
    }
}

#[component]
fn ClaimReviewRow(claim: Claim) -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let id = claim.id;
    let (response, setResponse) = signal(claim.admin_response.clone().unwrap_or_default());
    let (busy, setBusy) = signal(false);

    let review = move |status: &'static str| {
        let text = response.get_untracked();
        let body = AdminClaimReview {
            status: status.to_string(),
            admin_response: (!text.trim().is_empty()).then(|| text.trim().to_string()),
        };
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["admin", "claims"], "Claim updated", "Could not update claim");
        spawn_api(
            move |client| async move { client.review_claim(id, &body).await },
            move |result| {
                setBusy.set(false);
                finish(result);
            },
        );
    };

    let meta = format!(
        "User #{} • {}",
        claim.user_id.map(|u| u.to_string()).unwrap_or_else(|| "?".into()),
        claim.created_at.as_deref().map(format_timestamp).unwrap_or_default()
    );
    let open = claim.is_open();

    view! {
        <li class="item-row">
            <div class="item-main">
                <div class="item-title">{claim.description.clone()}</div>
                <div class="item-meta">{meta}</div>
                {claim.image_url.clone().map(|url| view! {
                    <a class="item-meta" href=url target="_blank" rel="noreferrer">"View image"</a>
                })}
                {if open {
                    view! {
                        <input
                            type="text"
                            placeholder="Response to the user"
                            prop:value=move || response.get()
                            on:input=move |ev| setResponse.set(event_target_value(&ev))
                        />
                    }
                        .into_any()
                } else {
                    view! { <div class="item-response">{claim.admin_response.clone().unwrap_or_default()}</div> }
                        .into_any()
                }}
            </div>
            <div class="item-actions">
                <StatusBadge status=claim.status.clone() />
                {open.then(|| view! {
                    <button class="btn btn-primary btn-sm" disabled=move || busy.get() on:click=move |_| review("approved")>
                        "Approve"
                    </button>
                    <button class="btn btn-ghost btn-sm" disabled=move || busy.get() on:click=move |_| review("rejected")>
                        "Reject"
                    </button>
                })}
            </div>
        </li>
    }
}

#[component]
fn BroadcastForm() -> impl IntoView {
    let toasts = use_toasts();
    let (userId, setUserId) = signal(String::new());
    let (title, setTitle) = signal(String::new());
    let (body, setBody) = signal(String::new());
    let (busy, setBusy) = signal(false);

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let title = title.get_untracked().trim().to_string();
        let body = body.get_untracked().trim().to_string();
        if title.is_empty() || body.is_empty() {
            toasts.error("A title and a message are required.");
            return;
        }
        let target = userId.get_untracked();
        let userId = if target.trim().is_empty() {
            None
        } else {
            match target.trim().parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    toasts.error("User ID must be a number, or blank for everyone.");
                    return;
                }
            }
        };
        let request = AdminNotificationRequest { user_id: userId, title, body };
        setBusy.set(true);
        spawn_api(
            move |client| async move { client.broadcast_notification(&request).await },
            move |result| {
                setBusy.set(false);
                match result {
                    Ok(()) => {
                        setTitle.set(String::new());
                        setBody.set(String::new());
                        toasts.success("Notification sent");
                    }
                    Err(gc_client::ApiError::Unauthorized) => {}
                    Err(e) => toasts.error(format!("Could not send notification: {e}")),
                }
            },
        );
    };

    view! {
        <form class="card" on:submit=onSubmit>
            <div class="card-title">"Send a notification"</div>
            <div class="form-group">
                <label for="notify-user">"User ID (blank for everyone)"</label>
                <input
                    type="text"
                    id="notify-user"
                    inputmode="numeric"
                    prop:value=move || userId.get()
                    on:input=move |ev| setUserId.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="notify-title">"Title"</label>
                <input
                    type="text"
                    id="notify-title"
                    prop:value=move || title.get()
                    on:input=move |ev| setTitle.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="notify-body">"Message"</label>
                <textarea
                    id="notify-body"
                    prop:value=move || body.get()
                    on:input=move |ev| setBody.set(event_target_value(&ev))
                ></textarea>
            </div>
            <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                {move || if busy.get() { "Sending..." } else { "Send" }}
            </button>
        </form>
    }
}
