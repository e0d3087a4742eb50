use gc_types::money::{format_cents, format_signed_cents, validate_spend};
use gc_types::timestamps::format_timestamp;
use gc_types::{total_pages, DonateRequest, RedeemRequest, Transaction, CHARITIES};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::metric_card::MetricCard;
use crate::components::pager::Pager;
use crate::components::states::{Empty, ErrorBox, Loading};
use crate::components::toast::use_toasts;
use crate::hooks::{after_mutation, spawn_api, use_wallet_balance, use_wallet_history, WALLET_PAGE_SIZE};
use crate::query::use_query_client;

#[component]
pub fn WalletPage() -> impl IntoView {
    let (page, setPage) = signal(1u32);
    let balance = use_wallet_balance();
    let history = use_wallet_history(page);

    let balanceCents = Signal::derive(move || {
        balance.with(|b| match b {
            Some(Ok(b)) => Some(b.balance_cents),
            _ => None,
        })
    });
    let pages = Signal::derive(move || {
        history.with(|h| match h {
            Some(Ok(h)) => total_pages(h.total, WALLET_PAGE_SIZE),
            _ => 1,
        })
    });

    view! {
        <div class="dashboard-header">
            <h1>"Wallet"</h1>
            <p class="subtitle">"Deposit refunds from your collections"</p>
        </div>
        <div class="card-grid">
            {move || match balance.get() {
                None => view! { <Loading label="Loading balance..." /> }.into_any(),
                Some(Err(e)) => view! { <ErrorBox message=format!("Could not load your balance: {e}") /> }.into_any(),
                Some(Ok(b)) => {
                    let hint = b
                        .last_updated
                        .as_deref()
                        .map(|ts| format!("Updated {}", format_timestamp(ts)))
                        .unwrap_or_default();
                    view! { <MetricCard title="Balance" value=format_cents(b.balance_cents) hint=hint /> }
                        .into_any()
                }
            }}
            <DonateForm balance=balanceCents />
            <RedeemForm balance=balanceCents />
        </div>
        <h2 class="section-title">"History"</h2>
        {move || match history.get() {
            None => view! { <Loading label="Loading history..." /> }.into_any(),
            Some(Err(e)) => view! { <ErrorBox message=format!("Could not load your history: {e}") /> }.into_any(),
            Some(Ok(h)) if h.items.is_empty() => {
                view! { <Empty message="No transactions yet. Book a collection to start earning." /> }
                    .into_any()
            }
            Some(Ok(h)) => {
                view! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"When"</th>
                                <th>"Type"</th>
                                <th>"Note"</th>
                                <th class="num">"Amount"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {h.items.into_iter().map(transaction_row).collect_view()}
                        </tbody>
                    </table>
                }
                    .into_any()
            }
        }}
        <Pager page=page set_page=setPage total_pages=pages />
    }
}

fn transaction_row(txn: Transaction) -> impl IntoView {
    let amountClass = if txn.amount_cents < 0 { "num debit" } else { "num credit" };
    view! {
        <tr>
            <td>{format_timestamp(&txn.ts)}</td>
            <td>{txn.kind_label()}</td>
            <td>{txn.note.clone().unwrap_or_default()}</td>
            <td class=amountClass>{format_signed_cents(txn.amount_cents)}</td>
        </tr>
    }
}

#[component]
fn DonateForm(balance: Signal<Option<i64>>) -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let (amount, setAmount) = signal(String::new());
    let (charity, setCharity) = signal(CHARITIES[0].id.to_string());
    let (busy, setBusy) = signal(false);

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let cents = match validate_spend(&amount.get_untracked(), balance.get_untracked().unwrap_or(0)) {
            Ok(cents) => cents,
            Err(e) => {
                toasts.error(e.to_string());
                return;
            }
        };
        let request = DonateRequest {
            amount_cents: cents,
            charity_id: charity.get_untracked(),
        };
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["wallet"], "Thank you for donating!", "Donation failed");
        spawn_api(
            move |client| async move { client.donate(&request).await },
            move |result| {
                if result.is_ok() {
                    setAmount.set(String::new());
                }
                setBusy.set(false);
                finish(result);
            },
        );
    };

    view! {
        <form class="card" on:submit=onSubmit>
            <div class="card-title">"Donate"</div>
            <div class="form-group">
                <label for="donate-charity">"Charity"</label>
                <select
                    id="donate-charity"
                    prop:value=move || charity.get()
                    on:change=move |ev| setCharity.set(event_target_value(&ev))
                >
                    {CHARITIES
                        .iter()
                        .map(|c| view! { <option value=c.id>{c.name}</option> })
                        .collect_view()}
                </select>
            </div>
            <div class="form-group">
                <label for="donate-amount">"Amount (€)"</label>
                <input
                    type="text"
                    id="donate-amount"
                    inputmode="decimal"
                    placeholder="2.50"
                    prop:value=move || amount.get()
                    on:input=move |ev| setAmount.set(event_target_value(&ev))
                />
            </div>
            <button type="submit" class="btn btn-primary" disabled=move || busy.get() || balance.get().is_none()>
                {move || if busy.get() { "Donating..." } else { "Donate" }}
            </button>
        </form>
    }
}

#[component]
fn RedeemForm(balance: Signal<Option<i64>>) -> impl IntoView {
    let toasts = use_toasts();
    let queries = use_query_client();
    let (amount, setAmount) = signal(String::new());
    let (busy, setBusy) = signal(false);

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let cents = match validate_spend(&amount.get_untracked(), balance.get_untracked().unwrap_or(0)) {
            Ok(cents) => cents,
            Err(e) => {
                toasts.error(e.to_string());
                return;
            }
        };
        setBusy.set(true);
        let finish = after_mutation(toasts, queries, &["wallet"], "Redemption requested", "Redemption failed");
        spawn_api(
            move |client| async move { client.redeem(&RedeemRequest { amount_cents: cents }).await },
            move |result| {
                if result.is_ok() {
                    setAmount.set(String::new());
                }
                setBusy.set(false);
                finish(result);
            },
        );
    };

    view! {
        <form class="card" on:submit=onSubmit>
            <div class="card-title">"Redeem"</div>
            <p class="card-text">"Pay your balance out to your bank account."</p>
            <div class="form-group">
                <label for="redeem-amount">"Amount (€)"</label>
                <input
                    type="text"
                    id="redeem-amount"
                    inputmode="decimal"
                    placeholder="5.00"
                    prop:value=move || amount.get()
                    on:input=move |ev| setAmount.set(event_target_value(&ev))
                />
            </div>
            <button type="submit" class="btn btn-secondary" disabled=move || busy.get() || balance.get().is_none()>
                {move || if busy.get() { "Redeeming..." } else { "Redeem" }}
            </button>
        </form>
    }
}
