use gc_types::timestamps::format_timestamp;
use gc_types::{unread_count, Notification};
use leptos::prelude::*;

use crate::components::states::{Empty, ErrorBox, Loading};
use crate::components::toast::use_toasts;
use crate::hooks::{spawn_api, use_notifications};
use crate::query::use_query_client;

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let notifications = use_notifications();

    let subtitle = move || {
        notifications.with(|n| match n {
            Some(Ok(items)) => match unread_count(items) {
                0 => "You're all caught up".to_string(),
                1 => "1 unread message".to_string(),
                count => format!("{count} unread messages"),
            },
            _ => "Messages from the GreenCredits team".to_string(),
        })
    };

    view! {
        <div class="dashboard-header">
            <h1>"Notifications"</h1>
            <p class="subtitle">{subtitle}</p>
        </div>
        {move || match notifications.get() {
            None => view! { <Loading label="Loading notifications..." /> }.into_any(),
            Some(Err(e)) => view! { <ErrorBox message=format!("Could not load notifications: {e}") /> }.into_any(),
            Some(Ok(items)) if items.is_empty() => view! { <Empty message="No notifications yet." /> }.into_any(),
            Some(Ok(items)) => {
                view! {
                    <ul class="item-list">
                        {items
                            .into_iter()
                            .map(|n| view! { <NotificationRow notification=n /> })
                            .collect_view()}
                    </ul>
                }
                    .into_any()
            }
        }}
    }
}

#[component]
fn NotificationRow(notification: Notification) -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let id = notification.id;
    let (busy, setBusy) = signal(false);

    let onRead = move |_| {
        setBusy.set(true);
        spawn_api(
            move |client| async move { client.mark_notification_read(id).await },
            move |result| {
                setBusy.set(false);
                match result {
                    Ok(_) => queries.invalidate("notifications"),
                    Err(gc_client::ApiError::Unauthorized) => {}
                    Err(e) => toasts.error(format!("Could not mark as read: {e}")),
                }
            },
        );
    };

    let sent = notification.created_at.as_deref().map(format_timestamp).unwrap_or_default();
    view! {
        <li class="item-row" class:item-unread=!notification.is_read>
            <div class="item-main">
                <div class="item-title">{notification.title.clone()}</div>
                <div class="item-body">{notification.body.clone()}</div>
                <div class="item-meta">{sent}</div>
            </div>
            {(!notification.is_read).then(|| view! {
                <button class="btn btn-ghost btn-sm" disabled=move || busy.get() on:click=onRead>
                    "Mark read"
                </button>
            })}
        </li>
    }
}
