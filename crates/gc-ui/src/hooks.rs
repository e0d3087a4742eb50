//! Data hooks, one per resource, plus the glue pages use to run
//! mutations.

use std::future::Future;

use gc_client::cache::query_key;
use gc_client::{ApiClient, ApiError};
use gc_types::{
    AdminCollection, AdminDriver, AdminMetrics, Claim, CollectionSlot, CollectionsPage,
    DriverCollection, DriverEarningsBalance, DriverFilter, DriverPayout, DriverProfile,
    Notification, ReturnPoint, ReturnPointsPage, ReturnPointsQuery, Subscription, WalletBalance,
    WalletHistory,
};
use leptos::prelude::*;

use crate::api;
use crate::components::toast::ToastContext;
use crate::query::{use_query, QueryClient, QueryState};

pub const COLLECTIONS_PAGE_SIZE: u32 = 10;
pub const WALLET_PAGE_SIZE: u32 = 10;

const SHORT_STALE_MS: i64 = 30_000;
const LONG_STALE_MS: i64 = 60_000;

/// Runs a future on the browser's event loop. Server rendering never
/// fetches, so outside the hydrate build the future is dropped.
pub fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        wasm_bindgen_futures::spawn_local(fut);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        drop(fut);
    }
}

/// Runs one API call and hands the result to `done`.
pub fn spawn_api<T, F, Fut, D>(run: F, done: D)
where
    T: 'static,
    F: FnOnce(ApiClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
    D: FnOnce(Result<T, ApiError>) + 'static,
{
    spawn(async move {
        let result = run(api::client()).await;
        done(result);
    });
}

/// The usual follow-up to a mutation: toast the outcome and refetch the
/// resources under `roots`. A 401 is left to the redirect.
pub fn after_mutation<T>(
    toasts: ToastContext,
    queries: QueryClient,
    roots: &'static [&'static str],
    success: &'static str,
    failure: &'static str,
) -> impl FnOnce(Result<T, ApiError>) {
    move |result| match result {
        Ok(_) => {
            toasts.success(success);
            queries.invalidate_many(roots);
        }
        Err(ApiError::Unauthorized) => {}
        Err(e) => toasts.error(format!("{failure}: {e}")),
    }
}

pub fn use_wallet_balance() -> ReadSignal<QueryState<WalletBalance>> {
    use_query(
        || query_key(&["wallet", "balance"]),
        LONG_STALE_MS,
        |client: ApiClient| async move { client.wallet_balance().await },
    )
}

pub fn use_wallet_history(page: ReadSignal<u32>) -> ReadSignal<QueryState<WalletHistory>> {
    use_query(
        move || {
            let page = page.get().to_string();
            query_key(&["wallet", "history", &page])
        },
        SHORT_STALE_MS,
        move |client: ApiClient| {
            let page = page.get_untracked();
            async move { client.wallet_history(page, WALLET_PAGE_SIZE).await }
        },
    )
}

pub fn use_collections(page: ReadSignal<u32>) -> ReadSignal<QueryState<CollectionsPage>> {
    use_query(
        move || {
            let page = format!("page={}", page.get());
            query_key(&["collections", &page])
        },
        SHORT_STALE_MS,
        move |client: ApiClient| {
            let page = page.get_untracked();
            async move {
                client
                    .my_collections(page, COLLECTIONS_PAGE_SIZE, None)
                    .await
            }
        },
    )
}

/// Every return point; the list is small enough to filter client-side.
pub fn use_return_points() -> ReadSignal<QueryState<ReturnPointsPage>> {
    use_query(
        || query_key(&["return-points", "all"]),
        LONG_STALE_MS,
        |client: ApiClient| async move {
            client.return_points(&ReturnPointsQuery::all(500)).await
        },
    )
}

pub fn return_point_name(points: &[ReturnPoint], id: i64) -> String {
    points
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("Return point #{id}"))
}

pub fn use_subscription() -> ReadSignal<QueryState<Option<Subscription>>> {
    use_query(
        || query_key(&["subscription", "me"]),
        LONG_STALE_MS,
        |client: ApiClient| async move { client.my_subscription().await },
    )
}

pub fn use_collection_slot() -> ReadSignal<QueryState<Option<CollectionSlot>>> {
    use_query(
        || query_key(&["collection-slots", "me"]),
        LONG_STALE_MS,
        |client: ApiClient| async move { client.my_slot().await },
    )
}

pub fn use_claims() -> ReadSignal<QueryState<Vec<Claim>>> {
    use_query(
        || query_key(&["claims", "me"]),
        SHORT_STALE_MS,
        |client: ApiClient| async move { client.my_claims().await },
    )
}

pub fn use_notifications() -> ReadSignal<QueryState<Vec<Notification>>> {
    use_query(
        || query_key(&["notifications", "me"]),
        SHORT_STALE_MS,
        |client: ApiClient| async move { client.my_notifications().await },
    )
}

pub fn use_driver_profile() -> ReadSignal<QueryState<DriverProfile>> {
    use_query(
        || query_key(&["driver", "profile"]),
        LONG_STALE_MS,
        |client: ApiClient| async move { client.driver_profile().await },
    )
}

pub fn use_driver_collections(
    filter: ReadSignal<DriverFilter>,
) -> ReadSignal<QueryState<Vec<DriverCollection>>> {
    use_query(
        move || {
            let status = filter.get().as_query().unwrap_or("all");
            query_key(&["driver", "collections", status])
        },
        SHORT_STALE_MS,
        move |client: ApiClient| {
            let filter = filter.get_untracked();
            async move { client.driver_collections(filter).await }
        },
    )
}

pub fn use_driver_earnings() -> ReadSignal<QueryState<DriverEarningsBalance>> {
    use_query(
        || query_key(&["driver", "earnings"]),
        SHORT_STALE_MS,
        |client: ApiClient| async move { client.driver_earnings().await },
    )
}

pub fn use_driver_payouts() -> ReadSignal<QueryState<Vec<DriverPayout>>> {
    use_query(
        || query_key(&["driver", "payouts"]),
        SHORT_STALE_MS,
        |client: ApiClient| async move { client.driver_payouts().await },
    )
}

pub fn use_admin_metrics() -> ReadSignal<QueryState<AdminMetrics>> {
    use_query(
        || query_key(&["admin", "metrics"]),
        SHORT_STALE_MS,
        |client: ApiClient| async move { client.admin_metrics().await },
    )
}

/// `status` is empty for all collections.
pub fn use_admin_collections(status: ReadSignal<String>) -> ReadSignal<QueryState<Vec<AdminCollection>>> {
    use_query(
        move || {
            let status = status.get();
            query_key(&["admin", "collections", &status])
        },
        SHORT_STALE_MS,
        move |client: ApiClient| {
            let status = status.get_untracked();
            async move { client.admin_collections(Some(status.as_str())).await }
        },
    )
}

pub fn use_admin_drivers() -> ReadSignal<QueryState<Vec<AdminDriver>>> {
    use_query(
        || query_key(&["admin", "drivers"]),
        LONG_STALE_MS,
        |client: ApiClient| async move { client.admin_drivers().await },
    )
}

pub fn use_admin_payouts() -> ReadSignal<QueryState<Vec<DriverPayout>>> {
    use_query(
        || query_key(&["admin", "payouts"]),
        SHORT_STALE_MS,
        |client: ApiClient| async move { client.admin_payouts().await },
    )
}

pub fn use_admin_claims() -> ReadSignal<QueryState<Vec<Claim>>> {
    use_query(
        || query_key(&["admin", "claims"]),
        SHORT_STALE_MS,
        |client: ApiClient| async move { client.admin_claims().await },
    )
}
