use gc_types::PlanCode;
use leptos::prelude::*;

use super::redirect_when_authenticated;

const STEPS: [(&str, &str); 4] = [
    (
        "1. Collect and schedule pickup",
        "Use Subscriptions or Collections to arrange bag pickups.",
    ),
    (
        "2. Processing at return points",
        "Bags are processed at partner locations.",
    ),
    (
        "3. Earn GreenCredits",
        "Credits appear in your wallet after processing.",
    ),
    (
        "4. Redeem and track",
        "Use your balance and see recent transactions.",
    ),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    redirect_when_authenticated(None);

    view! {
        <section class="landing">
            <h1>"GreenCredits"</h1>
            <p class="subtitle">"Deposit Return Scheme credits for bottles and cans."</p>
            <div class="step-list">
                {STEPS
                    .iter()
                    .map(|(title, body)| {
                        view! {
                            <div class="card step">
                                <div class="card-title">{*title}</div>
                                <p>{*body}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <h2>"Plans"</h2>
            <div class="plan-grid">
                {PlanCode::ALL
                    .iter()
                    .map(|plan| {
                        view! {
                            <div class="card plan">
                                <div class="card-title">{plan.title()}</div>
                                <p>{plan.blurb()}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="landing-actions">
                <a href="/signup" class="btn btn-primary">"Sign up"</a>
                <a href="/login" class="btn btn-ghost">"Login"</a>
            </div>
        </section>
    }
}
