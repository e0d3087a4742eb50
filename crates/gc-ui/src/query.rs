//! Reactive wrapper around [`gc_client::cache::QueryCache`].
//!
//! Every query runs inside an effect that also tracks the client's
//! revision signal. Invalidating a root bumps the revision, the effects
//! re-run, find their entries gone and fetch again. Queries whose entry
//! survived see the same version and leave their view alone.

use std::future::Future;

use gc_client::cache::{Cached, Lookup, QueryCache, QueryKey, Seen};
use gc_client::{ApiClient, ApiError};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api;
use crate::hooks::spawn;

/// `None` while loading, then the value or a displayable error.
pub type QueryState<T> = Option<Result<T, String>>;

#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: StoredValue<QueryCache>,
    revision: RwSignal<u64>,
}

impl QueryClient {
    fn new() -> Self {
        Self {
            cache: StoredValue::new(QueryCache::new()),
            revision: RwSignal::new(0),
        }
    }

    pub fn invalidate(&self, root: &str) {
        self.cache.update_value(|cache| {
            cache.invalidate(root);
        });
        self.bump();
    }

    pub fn invalidate_many(&self, roots: &[&str]) {
        self.cache.update_value(|cache| {
            for root in roots {
                cache.invalidate(root);
            }
        });
        self.bump();
    }

    /// Forgets everything, used on logout.
    pub fn clear(&self) {
        self.cache.update_value(QueryCache::clear);
        self.bump();
    }

    fn bump(&self) {
        self.revision.update(|r| *r += 1);
    }
}

pub fn provide_query_client() -> QueryClient {
    let client = QueryClient::new();
    provide_context(client);
    client
}

pub fn use_query_client() -> QueryClient {
    expect_context::<QueryClient>()
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, String> {
    serde_json::from_value(value).map_err(|e| format!("Unexpected response from server: {e}"))
}

/// Runs `fetcher` for `key` unless a fresh cached value exists or the same
/// key is already being fetched. `key` may read signals (page numbers,
/// filters); the query re-runs when they change.
pub fn use_query<T, K, F, Fut>(key: K, staleMs: i64, fetcher: F) -> ReadSignal<QueryState<T>>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    K: Fn() -> QueryKey + 'static,
    F: Fn(ApiClient) -> Fut + Clone + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let queries = use_query_client();
    let (state, setState) = signal(QueryState::<T>::None);
    let seen = StoredValue::new(Seen::default());

    // Pushes a cached entry unless this query already shows that version.
    let apply = move |cached: Cached| {
        if seen.try_update_value(|seen| seen.advance(cached.version)) == Some(true) {
            setState.set(Some(decode(cached.value)));
        }
    };

    Effect::new(move |_| {
        queries.revision.track();
        let key = key();
        let lookup = queries
            .cache
            .try_update_value(|cache| cache.begin(&key, staleMs, now_ms()));

        match lookup {
            Some(Lookup::Fresh(cached)) => apply(cached),
            Some(Lookup::InFlight(stale)) => {
                if let Some(cached) = stale {
                    apply(cached);
                }
            }
            Some(Lookup::Fetch { id, stale }) => {
                if let Some(cached) = stale {
                    apply(cached);
                }
                let fetcher = fetcher.clone();
                spawn(async move {
                    match fetcher(api::client()).await {
                        Ok(value) => {
                            let Ok(json) = serde_json::to_value(&value) else {
                                queries.cache.update_value(|cache| {
                                    cache.fail(&key, id);
                                });
                                seen.update_value(Seen::reset);
                                setState.set(Some(Ok(value)));
                                return;
                            };
                            let completed = queries
                                .cache
                                .try_update_value(|cache| cache.complete(&key, id, json, now_ms()))
                                .flatten();
                            // A newer fetch owns the key; its result wins.
                            let Some(completed) = completed else {
                                return;
                            };
                            if seen.try_update_value(|seen| seen.advance(completed.version)) == Some(true) {
                                setState.set(Some(Ok(value)));
                            }
                            if completed.had_waiters {
                                queries.bump();
                            }
                        }
                        Err(e) => {
                            let failed = queries
                                .cache
                                .try_update_value(|cache| cache.fail(&key, id))
                                .flatten();
                            let Some(hadWaiters) = failed else {
                                return;
                            };
                            seen.update_value(Seen::reset);
                            setState.set(Some(Err(e.to_string())));
                            if hadWaiters {
                                queries.bump();
                            }
                        }
                    }
                });
            }
            None => {}
        }
    });

    state
}
