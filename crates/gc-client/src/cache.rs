//! Request cache behind the UI data hooks.
//!
//! Entries are keyed by segment lists whose first segment names the
//! resource (`["wallet", "history", "page=1"]`). Mutations invalidate by
//! that root. Time is passed in by the caller as epoch milliseconds so the
//! store stays usable from wasm and from plain unit tests.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::debug;

pub type QueryKey = Vec<String>;

pub fn query_key(segments: &[&str]) -> QueryKey {
    segments.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    fetched_at_ms: i64,
    version: u64,
}

/// A cached value together with the version it was stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached {
    pub value: Value,
    pub version: u64,
}

impl From<&Entry> for Cached {
    fn from(entry: &Entry) -> Self {
        Cached {
            value: entry.value.clone(),
            version: entry.version,
        }
    }
}

/// What a query should do next.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Cached and younger than the stale time.
    Fresh(Cached),
    /// Another caller is already fetching this key.
    InFlight(Option<Cached>),
    /// The caller owns fetch `id` now; `stale` is the last known value.
    /// Only that id may later `complete` or `fail` the key.
    Fetch { id: u64, stale: Option<Cached> },
}

/// Result of storing a fetched value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completed {
    pub version: u64,
    /// Some other query asked for this key while it was in flight and is
    /// waiting to be re-run.
    pub had_waiters: bool,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Entry>,
    /// Key to the id of the fetch that currently owns it.
    in_flight: HashMap<QueryKey, u64>,
    waiters: HashSet<QueryKey>,
    next_version: u64,
    next_fetch: u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, key: &QueryKey, staleMs: i64, nowMs: i64) -> Lookup {
        let cached = self.entries.get(key);
        if let Some(entry) = cached {
            if nowMs - entry.fetched_at_ms < staleMs {
                return Lookup::Fresh(entry.into());
            }
        }
        let stale = cached.map(Cached::from);
        if self.in_flight.contains_key(key) {
            self.waiters.insert(key.clone());
            return Lookup::InFlight(stale);
        }
        self.next_fetch += 1;
        let id = self.next_fetch;
        self.in_flight.insert(key.clone(), id);
        debug!(?key, id, "query fetch");
        Lookup::Fetch { id, stale }
    }

    fn owns(&self, key: &QueryKey, id: u64) -> bool {
        self.in_flight.get(key) == Some(&id)
    }

    /// Stores the value fetched by `id`. A fetch that was invalidated or
    /// superseded while in flight is dropped and `None` is returned.
    pub fn complete(&mut self, key: &QueryKey, id: u64, value: Value, nowMs: i64) -> Option<Completed> {
        if !self.owns(key, id) {
            debug!(?key, id, "query result dropped");
            return None;
        }
        self.in_flight.remove(key);
        let hadWaiters = self.waiters.remove(key);
        self.next_version += 1;
        self.entries.insert(
            key.clone(),
            Entry {
                value,
                fetched_at_ms: nowMs,
                version: self.next_version,
            },
        );
        Some(Completed {
            version: self.next_version,
            had_waiters: hadWaiters,
        })
    }

    /// Releases failed fetch `id`. Returns `None` when the fetch no longer
    /// owns the key, otherwise whether other queries were waiting on it.
    pub fn fail(&mut self, key: &QueryKey, id: u64) -> Option<bool> {
        if !self.owns(key, id) {
            return None;
        }
        self.in_flight.remove(key);
        Some(self.waiters.remove(key))
    }

    pub fn get(&self, key: &QueryKey) -> Option<&Value> {
        self.entries.get(key).map(|e| &e.value)
    }

    pub fn version(&self, key: &QueryKey) -> Option<u64> {
        self.entries.get(key).map(|e| e.version)
    }

    pub fn is_in_flight(&self, key: &QueryKey) -> bool {
        self.in_flight.contains_key(key)
    }

    /// Drops every entry and pending fetch under `root`. Returns how many
    /// keys were affected.
    pub fn invalidate(&mut self, root: &str) -> usize {
        let matches = |key: &QueryKey| key.first().is_some_and(|first| first == root);
        let before = self.entries.len() + self.in_flight.len();
        self.entries.retain(|key, _| !matches(key));
        self.in_flight.retain(|key, _| !matches(key));
        self.waiters.retain(|key| !matches(key));
        let removed = before - self.entries.len() - self.in_flight.len();
        debug!(root, removed, "query invalidate");
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.in_flight.clear();
        self.waiters.clear();
    }
}

/// The entry version a single query last handed to its view.
///
/// Every cache change re-runs every query; a query whose own entry did not
/// change must not push the same data again or it rebuilds its view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Seen(Option<u64>);

impl Seen {
    /// Records `version` and returns whether it differs from the last one.
    pub fn advance(&mut self, version: u64) -> bool {
        if self.0 == Some(version) {
            return false;
        }
        self.0 = Some(version);
        true
    }

    pub fn reset(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fetch_id(lookup: Lookup) -> u64 {
        match lookup {
            Lookup::Fetch { id, .. } => id,
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[test]
    fn second_query_while_in_flight_does_not_fetch() {
        let mut cache = QueryCache::new();
        let key = query_key(&["wallet", "balance"]);

        let id = fetch_id(cache.begin(&key, 60_000, 0));
        assert_eq!(cache.begin(&key, 60_000, 5), Lookup::InFlight(None));

        let done = cache.complete(&key, id, json!({"balanceCents": 1230}), 10).unwrap();
        assert!(done.had_waiters);
        assert_eq!(
            cache.begin(&key, 60_000, 20),
            Lookup::Fresh(Cached {
                value: json!({"balanceCents": 1230}),
                version: done.version,
            })
        );
    }

    #[test]
    fn stale_entries_refetch_with_last_value() {
        let mut cache = QueryCache::new();
        let key = query_key(&["subscription", "me"]);
        let id = fetch_id(cache.begin(&key, 1_000, 0));
        let done = cache.complete(&key, id, json!({"status": "active"}), 0).unwrap();

        match cache.begin(&key, 1_000, 1_500) {
            Lookup::Fetch { id: next, stale } => {
                assert_ne!(next, id);
                assert_eq!(
                    stale,
                    Some(Cached {
                        value: json!({"status": "active"}),
                        version: done.version,
                    })
                );
            }
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[test]
    fn invalidate_matches_first_segment_only() {
        let mut cache = QueryCache::new();
        let page1 = query_key(&["collections", "page=1"]);
        let page2 = query_key(&["collections", "page=2"]);
        let points = query_key(&["return-points", "collections"]);
        for key in [&page1, &page2, &points] {
            let id = fetch_id(cache.begin(key, 60_000, 0));
            cache.complete(key, id, json!([]), 0);
        }

        assert_eq!(cache.invalidate("collections"), 2);
        assert!(cache.get(&page1).is_none());
        assert!(cache.get(&page2).is_none());
        assert!(cache.get(&points).is_some());
    }

    #[test]
    fn fetch_invalidated_in_flight_is_dropped() {
        let mut cache = QueryCache::new();
        let key = query_key(&["wallet", "history"]);
        let id = fetch_id(cache.begin(&key, 60_000, 0));
        cache.invalidate("wallet");

        assert_eq!(cache.complete(&key, id, json!({"items": []}), 1), None);
        assert!(cache.get(&key).is_none());
        assert!(!cache.is_in_flight(&key));
    }

    #[test]
    fn older_fetch_cannot_overwrite_refetch_after_invalidate() {
        let mut cache = QueryCache::new();
        let key = query_key(&["wallet", "balance"]);

        let first = fetch_id(cache.begin(&key, 60_000, 0));
        cache.invalidate("wallet");
        let second = fetch_id(cache.begin(&key, 60_000, 1));

        // The pre-mutation response lands first and must be ignored.
        assert_eq!(cache.complete(&key, first, json!({"balanceCents": 1000}), 2), None);
        assert!(cache.is_in_flight(&key));
        assert_eq!(cache.fail(&key, first), None);
        assert!(cache.is_in_flight(&key));

        assert!(cache.complete(&key, second, json!({"balanceCents": 750}), 3).is_some());
        assert_eq!(cache.get(&key), Some(&json!({"balanceCents": 750})));
        assert!(!cache.is_in_flight(&key));
    }

    #[test]
    fn failure_reports_waiters() {
        let mut cache = QueryCache::new();
        let key = query_key(&["claims", "me"]);
        let id = fetch_id(cache.begin(&key, 60_000, 0));
        assert_eq!(cache.fail(&key, id), Some(false));

        let id = fetch_id(cache.begin(&key, 60_000, 0));
        cache.begin(&key, 60_000, 0);
        assert_eq!(cache.fail(&key, id), Some(true));
        assert!(matches!(
            cache.begin(&key, 60_000, 0),
            Lookup::Fetch { stale: None, .. }
        ));
    }

    #[test]
    fn versions_increase_per_completion() {
        let mut cache = QueryCache::new();
        let a = query_key(&["claims"]);
        let b = query_key(&["notifications"]);
        let idA = fetch_id(cache.begin(&a, 0, 0));
        let idB = fetch_id(cache.begin(&b, 0, 0));
        let first = cache.complete(&a, idA, json!(1), 0).unwrap();
        let second = cache.complete(&b, idB, json!(2), 0).unwrap();
        assert!(second.version > first.version);
        assert!(!first.had_waiters);
        assert_eq!(cache.version(&a), Some(first.version));
    }

    #[test]
    fn unrelated_invalidation_does_not_reapply_entry() {
        let mut cache = QueryCache::new();
        let slot = query_key(&["collection-slot", "me"]);
        let id = fetch_id(cache.begin(&slot, 60_000, 0));
        cache.complete(&slot, id, json!({"weekday": 2}), 0);

        let mut seen = Seen::default();
        let Lookup::Fresh(first) = cache.begin(&slot, 60_000, 10) else {
            panic!("expected a fresh entry");
        };
        assert!(seen.advance(first.version));

        // A booking mutation elsewhere re-runs every query.
        cache.invalidate("collections");
        let Lookup::Fresh(again) = cache.begin(&slot, 60_000, 20) else {
            panic!("expected a fresh entry");
        };
        assert!(!seen.advance(again.version));

        cache.invalidate("collection-slot");
        let id = fetch_id(cache.begin(&slot, 60_000, 30));
        let done = cache.complete(&slot, id, json!({"weekday": 3}), 31).unwrap();
        assert!(seen.advance(done.version));
    }
}
