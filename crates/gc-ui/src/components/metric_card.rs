use leptos::prelude::*;

/// Card with a title header, used for balances and admin counters.
#[component]
pub fn MetricCard(
    #[prop(into)] title: String,
    /// Headline figure, e.g. a formatted balance.
    #[prop(optional, into)]
    value: Option<String>,
    #[prop(optional, into)]
    hint: Option<String>,
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="card">
            <div class="card-title">{title}</div>
            {value.map(|value| view! { <div class="metric-value">{value}</div> })}
            {hint.map(|hint| view! { <div class="metric-hint">{hint}</div> })}
            {children.map(|children| children())}
        </div>
    }
}
