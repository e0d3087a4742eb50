use gc_types::{filter_points, retailers, ReturnPoint};
use leptos::prelude::*;

use crate::components::states::{Empty, ErrorBox, Loading};
use crate::hooks::use_return_points;

#[component]
pub fn MapPage() -> impl IntoView {
    let points = use_return_points();
    let (needle, setNeedle) = signal(String::new());
    let (chain, setChain) = signal(String::new());

    let chains = move || {
        points.with(|p| match p {
            Some(Ok(p)) => retailers(&p.items),
            _ => Vec::new(),
        })
    };

    view! {
        <div class="dashboard-header">
            <h1>"Return points"</h1>
            <p class="subtitle">"Where your bags are returned for deposit refunds"</p>
        </div>
        <div class="filter-bar">
            <input
                type="search"
                placeholder="Search by name, retailer or Eircode"
                prop:value=move || needle.get()
                on:input=move |ev| setNeedle.set(event_target_value(&ev))
            />
            <select prop:value=move || chain.get() on:change=move |ev| setChain.set(event_target_value(&ev))>
                <option value="">"All chains"</option>
                {move || {
                    chains()
                        .into_iter()
                        .map(|name| {
                            let label = name.clone();
                            view! { <option value=name>{label}</option> }
                        })
                        .collect_view()
                }}
            </select>
        </div>
        <div class="legend">
            <span><span class="legend-dot" style="background:#22d3ee"></span>"Reverse vending machine"</span>
            <span><span class="legend-dot" style="background:#fbbf24"></span>"Manual return"</span>
            <span><span class="legend-dot" style="background:#60a5fa"></span>"Other"</span>
        </div>
        {move || match points.get() {
            None => view! { <Loading label="Loading return points..." /> }.into_any(),
            Some(Err(e)) => view! { <ErrorBox message=format!("Could not load return points: {e}") /> }.into_any(),
            Some(Ok(page)) => {
                let shown: Vec<ReturnPoint> = filter_points(&page.items, &needle.get(), &chain.get())
                    .into_iter()
                    .cloned()
                    .collect();
                if shown.is_empty() {
                    view! { <Empty message="No return points match your filters." /> }.into_any()
                } else {
                    view! {
                        <ul class="item-list">
                            {shown.into_iter().map(point_row).collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }
        }}
    }
}

fn point_row(point: ReturnPoint) -> impl IntoView {
    let dot = format!("background:{}", point.marker_color());
    let mut meta = point.kind.clone();
    for part in [point.retailer.as_deref(), point.eircode.as_deref()].into_iter().flatten() {
        meta.push_str(" • ");
        meta.push_str(part);
    }
    view! {
        <li class="item-row">
            <span class="legend-dot" style=dot></span>
            <div class="item-main">
                <div class="item-title">{point.name.clone()}</div>
                <div class="item-meta">{meta}</div>
            </div>
            <a class="btn btn-ghost btn-sm" href=point.map_url() target="_blank" rel="noreferrer">
                "Open map"
            </a>
        </li>
    }
}
