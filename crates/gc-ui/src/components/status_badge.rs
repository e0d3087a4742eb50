use leptos::prelude::*;

fn status_class(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "active" | "available" | "scheduled" | "approved" | "resolved" | "processed" | "completed" => {
            "status-running"
        }
        "canceled" | "cancelled" | "rejected" | "inactive" | "unavailable" | "failed" => "status-stopped",
        _ => "status-other",
    }
}

/// Coloured dot plus the raw status text the server sent.
#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    let class = format!("status-badge {}", status_class(&status));
    view! {
        <span class="status-pill">
            <span class=class></span>
            <span class="status-text">{status}</span>
        </span>
    }
}
