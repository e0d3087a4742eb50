use gc_types::schedule::{min_booking_date, validate_booking, validate_slot, BookingError, SlotDraft};
use gc_types::timestamps::{format_timestamp, now_local, today_local};
use gc_types::{
    has_upcoming_one_off, Collection, CollectionSlot, CreateCollection, ReturnPoint, SlotFrequency,
    VoucherPreference, CHARITIES,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::api;
use crate::auth::use_auth;
use crate::components::pager::Pager;
use crate::components::states::{Empty, ErrorBox, Loading};
use crate::components::status_badge::StatusBadge;
use crate::components::toast::use_toasts;
use crate::hooks::{
    after_mutation, return_point_name, spawn_api, use_collection_slot, use_collections,
    use_return_points, use_subscription, COLLECTIONS_PAGE_SIZE,
};
use crate::query::use_query_client;

#[component]
pub fn CollectionsPage() -> impl IntoView {
    let auth = use_auth();
    let (page, setPage) = signal(1u32);
    let collections = use_collections(page);
    let points = use_return_points();
    let slot = use_collection_slot();
    let subscription = use_subscription();

    let pointList = Signal::derive(move || {
        points.with(|p| match p {
            Some(Ok(p)) => p.items.clone(),
            _ => Vec::new(),
        })
    });
    let pages = Signal::derive(move || {
        collections.with(|c| match c {
            Some(Ok(c)) => c.total_pages(COLLECTIONS_PAGE_SIZE),
            _ => 1,
        })
    });
    let hasAddress = Signal::derive(move || auth.user().is_some_and(|u| u.has_address()));
    let slotEnabled = Signal::derive(move || {
        slot.with(|s| matches!(s, Some(Ok(Some(slot))) if slot.is_enabled()))
    });
    // A failed lookup counts as no subscription.
    let subscriptionBlocked = Signal::derive(move || {
        subscription.with(|s| match s {
            None => false,
            Some(Ok(Some(sub))) => !sub.is_eligible_for_booking(today_local()),
            Some(_) => true,
        })
    });
    let hasUpcoming = Signal::derive(move || {
        collections.with(|c| match c {
            Some(Ok(c)) => has_upcoming_one_off(&c.items, now_local()),
            _ => false,
        })
    });

    view! {
        <div class="dashboard-header">
            <h1>"Collections"</h1>
            <p class="subtitle">
                "Schedule home collections for your bags. A driver comes in your chosen window and your wallet is credited after processing."
            </p>
        </div>
        <div class="collections-layout">
            <div class="card">
                <div class="card-title">"Your collections"</div>
                {move || match collections.get() {
                    None => view! { <Loading label="Loading collections..." /> }.into_any(),
                    Some(Err(e)) => view! { <ErrorBox message=format!("Could not load your collections: {e}") /> }.into_any(),
                    Some(Ok(c)) if c.items.is_empty() => {
                        view! { <Empty message="No collections yet. Schedule your first pickup." /> }.into_any()
                    }
                    Some(Ok(c)) => {
                        let points = pointList.get();
                        view! {
                            <ul class="item-list">
                                {c
                                    .items
                                    .into_iter()
                                    .map(|item| {
                                        let name = return_point_name(&points, item.return_point_id);
                                        view! { <CollectionRow item=item point_name=name /> }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                            .into_any()
                    }
                }}
                <Pager page=page set_page=setPage total_pages=pages />
            </div>
            <div>
                <Show when=move || !hasAddress.get()>
                    <div class="notice">
                        "You need to save your home address before scheduling a collection. "
                        <a href="/settings">"Go to Settings"</a>
                    </div>
                </Show>
                <Show when=move || subscriptionBlocked.get()>
                    <div class="notice">
                        "You need an active subscription to book collections. "
                        <a href="/settings">"Go to Settings"</a>
                    </div>
                </Show>
                <BookingForm
                    points=pointList
                    has_address=hasAddress
                    slot_enabled=slotEnabled
                    subscription_blocked=subscriptionBlocked
                />
            </div>
            <div class="card">
                <div class="card-title">"Recurring pickup schedule"</div>
                {move || match slot.get() {
                    None => view! { <Loading label="Loading schedule..." /> }.into_any(),
                    Some(Err(e)) => view! { <ErrorBox message=format!("Could not load schedule: {e}") /> }.into_any(),
                    Some(Ok(current)) => {
                        let current = current.filter(|s| !s.is_cancelled());
                        let points = pointList.get();
                        let summary = current.clone().map(|s| {
                            let name = s
                                .preferred_return_point_id
                                .and_then(|id| points.iter().find(|p| p.id == id))
                                .map(|p| p.name.clone());
                            view! { <SlotSummary current=s point_name=name /> }
                        });
                        let upcomingHint = (current.is_none() && hasUpcoming.get())
                            .then(|| {
                                view! {
                                    <p class="card-text">
                                        "You already have a collection scheduled. Cancel it to enable recurring pickups."
                                    </p>
                                }
                            });
                        view! {
                            {summary}
                            {upcomingHint}
                            <SlotForm current=current points=points />
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn CollectionRow(item: Collection, point_name: String) -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let id = item.id;

    let onCancel = move |_| {
        if !api::confirm("Cancel this collection?") {
            return;
        }
        spawn_api(
            move |client| async move { client.cancel_collection(id).await },
            after_mutation(toasts, queries, &["collections"], "Collection cancelled", "Could not cancel collection"),
        );
    };
    let onRemove = move |_| {
        if !api::confirm("Remove this canceled collection?") {
            return;
        }
        spawn_api(
            move |client| async move { client.delete_collection(id).await },
            after_mutation(toasts, queries, &["collections"], "Collection removed", "Could not remove collection"),
        );
    };

    let mut details = format!("{point_name} • Bags: {}", item.bag_count.unwrap_or(0));
    if let Some(notes) = item.notes.as_deref().filter(|n| !n.is_empty()) {
        details.push_str(" • ");
        details.push_str(notes);
    }

    view! {
        <li class="item-row">
            <div class="item-main">
                <div class="item-title">{format_timestamp(&item.scheduled_at)}</div>
                <div class="item-meta">{details}</div>
            </div>
            <div class="item-actions">
                <StatusBadge status=item.status.clone() />
                {item.can_cancel().then(|| view! {
                    <button class="btn btn-ghost btn-sm" on:click=onCancel>"Cancel"</button>
                })}
                {item.can_remove().then(|| view! {
                    <button class="btn btn-ghost btn-sm" on:click=onRemove>"Remove"</button>
                })}
            </div>
        </li>
    }
}

#[component]
fn BookingForm(
    points: Signal<Vec<ReturnPoint>>,
    has_address: Signal<bool>,
    slot_enabled: Signal<bool>,
    subscription_blocked: Signal<bool>,
) -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();

    let (date, setDate) = signal(String::new());
    let (time, setTime) = signal(String::new());
    let (pointId, setPointId) = signal(String::new());
    let (bags, setBags) = signal("1".to_string());
    let (notes, setNotes) = signal(String::new());
    let (preference, setPreference) = signal(VoucherPreference::Wallet);
    let (charity, setCharity) = signal(CHARITIES[0].id.to_string());
    let (formError, setFormError) = signal(Option::<String>::None);
    let (busy, setBusy) = signal(false);

    let blocked = move || !has_address.get() || slot_enabled.get() || subscription_blocked.get();

    let reset = move || {
        setDate.set(String::new());
        setTime.set(String::new());
        setPointId.set(String::new());
        setBags.set("1".into());
        setNotes.set(String::new());
        setPreference.set(VoucherPreference::Wallet);
        setCharity.set(CHARITIES[0].id.to_string());
    };

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if blocked() {
            return;
        }
        let booking = validate_booking(&date.get_untracked(), &time.get_untracked(), now_local())
            .and_then(|scheduledAt| {
                let pointId = pointId
                    .get_untracked()
                    .parse::<i64>()
                    .map_err(|_| BookingError::MissingReturnPoint)?;
                let bags = bags
                    .get_untracked()
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|b| *b >= 1)
                    .ok_or(BookingError::InvalidBagCount)?;
                Ok((scheduledAt, pointId, bags))
            });
        let (scheduledAt, pointId, bags) = match booking {
            Ok(values) => values,
            Err(e) => {
                toasts.error(e.to_string());
                setFormError.set(Some(e.to_string()));
                return;
            }
        };
        setFormError.set(None);

        let preference = preference.get_untracked();
        let notes = notes.get_untracked();
        let payload = CreateCollection {
            scheduled_at: scheduledAt,
            return_point_id: pointId,
            bag_count: bags,
            notes: (!notes.trim().is_empty()).then(|| notes.trim().to_string()),
            voucher_preference: preference,
            charity_id: (preference == VoucherPreference::Donate).then(|| charity.get_untracked()),
        };
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["collections"], "Collection scheduled", "Could not schedule collection");
        spawn_api(
            move |client| async move { client.create_collection(&payload).await },
            move |result| {
                if result.is_ok() {
                    reset();
                }
                setBusy.set(false);
                finish(result);
            },
        );
    };

    let choiceClass = move |choice: VoucherPreference| {
        if preference.get() == choice {
            "choice choice-active"
        } else {
            "choice"
        }
    };

    view! {
        <form class="card" class:card-disabled=move || slot_enabled.get() || subscription_blocked.get() on:submit=onSubmit>
            <div class="card-title">"Create a collection"</div>
            <Show when=move || slot_enabled.get()>
                <p class="card-text">
                    "You have a recurring pickup schedule enabled. Disable it to place a one-off collection."
                </p>
            </Show>
            <div class="form-group">
                <label for="booking-date">"Date"</label>
                <input
                    type="date"
                    id="booking-date"
                    min=min_booking_date(today_local())
                    prop:value=move || date.get()
                    on:input=move |ev| setDate.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="booking-time">"Time"</label>
                <input
                    type="time"
                    id="booking-time"
                    min="08:00"
                    max="20:00"
                    prop:value=move || time.get()
                    on:input=move |ev| setTime.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="booking-point">"Return point"</label>
                <ReturnPointSelect id="booking-point" points=points value=pointId set_value=setPointId />
            </div>
            <div class="form-group">
                <label for="booking-bags">"Bags"</label>
                <input
                    type="number"
                    id="booking-bags"
                    min="1"
                    prop:value=move || bags.get()
                    on:input=move |ev| setBags.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="booking-notes">"Notes"</label>
                <textarea
                    id="booking-notes"
                    prop:value=move || notes.get()
                    on:input=move |ev| setNotes.set(event_target_value(&ev))
                ></textarea>
            </div>
            <div class="form-group">
                <label>"Voucher goes to"</label>
                <div class="choice-row">
                    <button
                        type="button"
                        class=move || choiceClass(VoucherPreference::Wallet)
                        on:click=move |_| setPreference.set(VoucherPreference::Wallet)
                    >
                        "My wallet"
                    </button>
                    <button
                        type="button"
                        class=move || choiceClass(VoucherPreference::Donate)
                        on:click=move |_| setPreference.set(VoucherPreference::Donate)
                    >
                        "Donate to charity"
                    </button>
                </div>
                <Show when=move || preference.get() == VoucherPreference::Donate>
                    <select
                        prop:value=move || charity.get()
                        on:change=move |ev| setCharity.set(event_target_value(&ev))
                    >
                        {CHARITIES
                            .iter()
                            .map(|c| view! { <option value=c.id>{c.name}</option> })
                            .collect_view()}
                    </select>
                </Show>
            </div>
            {move || formError.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <button
                type="submit"
                class="btn btn-primary"
                disabled=move || {
                    busy.get() || blocked() || date.get().is_empty() || time.get().is_empty()
                        || pointId.get().is_empty()
                }
            >
                {move || if busy.get() { "Creating..." } else { "Create" }}
            </button>
        </form>
    }
}

#[component]
fn ReturnPointSelect(
    #[prop(into)] id: String,
    #[prop(into)] points: Signal<Vec<ReturnPoint>>,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <select
            id=id
            prop:value=move || value.get()
            on:change=move |ev| set_value.set(event_target_value(&ev))
        >
            <option value="">"-"</option>
            {move || {
                points
                    .get()
                    .into_iter()
                    .map(|p| view! { <option value=p.id.to_string()>{p.name}</option> })
                    .collect_view()
            }}
        </select>
    }
}

#[component]
fn SlotSummary(current: CollectionSlot, point_name: Option<String>) -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let Some(id) = current.id else {
        return ().into_any();
    };
    let paused = current.is_paused();
    let (busy, setBusy) = signal(false);

    let run = move |action: &'static str| {
        setBusy.set(true);
        let (success, failure) = match action {
            "pause" => ("Recurring pickups paused", "Could not pause schedule"),
            "resume" => ("Recurring pickups resumed", "Could not resume schedule"),
            "remove" => ("Recurring pickup schedule removed", "Could not remove schedule"),
            _ => ("Recurring pickups cancelled", "Could not cancel schedule"),
        };
        let finish = after_mutation(toasts, queries, &["collection-slots"], success, failure);
        spawn_api(
            move |client| async move {
                match action {
                    "pause" => client.pause_slot(id).await,
                    "resume" => client.resume_slot(id).await,
                    "remove" => client.delete_slot().await,
                    _ => client.cancel_slot(id).await,
                }
            },
            move |result| {
                setBusy.set(false);
                finish(result);
            },
        );
    };
    let onPause = move |_| {
        if api::confirm("Pause recurring pickup schedule?") {
            run("pause");
        }
    };
    let onResume = move |_| run("resume");
    let onCancel = move |_| {
        if api::confirm("Cancel recurring pickup schedule?") {
            run("cancel");
        }
    };
    let onRemove = move |_| {
        if api::confirm("Remove recurring pickup schedule?") {
            run("remove");
        }
    };

    view! {
        <div class="notice slot-summary">
            <span>"Your recurring pickup: " {current.summary(point_name.as_deref())}</span>
            <div class="item-actions">
                {if paused {
                    view! {
                        <button class="btn btn-primary btn-sm" disabled=move || busy.get() on:click=onResume>
                            "Resume"
                        </button>
                    }
                        .into_any()
                } else {
                    view! {
                        <button class="btn btn-ghost btn-sm" disabled=move || busy.get() on:click=onPause>
                            "Pause"
                        </button>
                    }
                        .into_any()
                }}
                <button class="btn btn-ghost btn-sm" disabled=move || busy.get() on:click=onCancel>
                    "Cancel"
                </button>
                <button class="btn btn-ghost btn-sm" disabled=move || busy.get() on:click=onRemove>
                    "Remove"
                </button>
            </div>
        </div>
    }
        .into_any()
}

#[component]
fn SlotForm(current: Option<CollectionSlot>, points: Vec<ReturnPoint>) -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();

    let initial = current.as_ref().map(SlotDraft::from_slot);
    let seed = initial.clone().unwrap_or_default();
    let isUpdate = initial.is_some();

    let (weekday, setWeekday) = signal(seed.weekday.map(|d| d.to_string()).unwrap_or_default());
    let (start, setStart) = signal(seed.start_time.clone());
    let (end, setEnd) = signal(seed.end_time.clone());
    let (preferred, setPreferred) = signal(
        seed.preferred_return_point_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
    );
    let (frequency, setFrequency) = signal(seed.frequency.as_str().to_string());
    let (busy, setBusy) = signal(false);

    let draft = move || SlotDraft {
        weekday: weekday.get().parse().ok(),
        start_time: start.get(),
        end_time: end.get(),
        preferred_return_point_id: preferred.get().parse().ok(),
        frequency: SlotFrequency::parse(&frequency.get()),
    };
    let isDirty = move || initial.as_ref().map_or(true, |i| *i != draft());

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let request = match validate_slot(&draft()) {
            Ok(request) => request,
            Err(e) => {
                toasts.error(e.to_string());
                return;
            }
        };
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["collection-slots"], "Schedule saved", "Could not save schedule");
        spawn_api(
            move |client| async move { client.save_slot(&request).await },
            move |result| {
                setBusy.set(false);
                finish(result);
            },
        );
    };

    let pointOptions = points
        .into_iter()
        .map(|p| view! { <option value=p.id.to_string()>{p.name}</option> })
        .collect_view();

    view! {
        <form on:submit=onSubmit>
            <div class="form-group">
                <label for="slot-frequency">"How often?"</label>
                <select
                    id="slot-frequency"
                    prop:value=move || frequency.get()
                    on:change=move |ev| setFrequency.set(event_target_value(&ev))
                >
                    <option value="weekly">"Weekly"</option>
                    <option value="fortnightly">"Every 2 weeks"</option>
                    <option value="monthly">"Monthly"</option>
                </select>
            </div>
            <div class="form-group">
                <label for="slot-weekday">"Weekday"</label>
                <select
                    id="slot-weekday"
                    prop:value=move || weekday.get()
                    on:change=move |ev| setWeekday.set(event_target_value(&ev))
                >
                    <option value="">"-"</option>
                    {gc_types::schedule::WEEKDAY_LABELS
                        .iter()
                        .enumerate()
                        .map(|(i, label)| view! { <option value=i.to_string()>{*label}</option> })
                        .collect_view()}
                </select>
            </div>
            <div class="form-group">
                <label for="slot-start">"Start time"</label>
                <input
                    type="time"
                    id="slot-start"
                    min="08:00"
                    max="20:00"
                    prop:value=move || start.get()
                    on:input=move |ev| setStart.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="slot-end">"End time"</label>
                <input
                    type="time"
                    id="slot-end"
                    min="08:00"
                    max="20:00"
                    prop:value=move || end.get()
                    on:input=move |ev| setEnd.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="slot-point">"Preferred return point *"</label>
                <select
                    id="slot-point"
                    prop:value=move || preferred.get()
                    on:change=move |ev| setPreferred.set(event_target_value(&ev))
                >
                    <option value="">"-"</option>
                    {pointOptions}
                </select>
            </div>
            <button
                type="submit"
                class="btn btn-primary"
                disabled=move || busy.get() || preferred.get().is_empty() || !isDirty()
            >
                {move || match (busy.get(), isUpdate) {
                    (true, _) => "Saving...",
                    (false, true) => "Update schedule",
                    (false, false) => "Create schedule",
                }}
            </button>
        </form>
    }
}
