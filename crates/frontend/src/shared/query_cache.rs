//! Explicit list invalidation.
//!
//! Every list query tracks a version number for its key. A mutation commits,
//! then bumps the version of the affected key; the tracking queries refetch.
//! Lists are never patched locally.

use std::collections::HashMap;
use std::future::Future;

use contracts::domain::common::Resource;
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::crud_api;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheVersions(HashMap<&'static str, u64>);

impl CacheVersions {
    pub fn version(&self, key: &str) -> u64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn invalidate(&mut self, key: &'static str) {
        *self.0.entry(key).or_insert(0) += 1;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QueryCache {
    versions: RwSignal<CacheVersions>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            versions: RwSignal::new(CacheVersions::default()),
        }
    }

    /// Tracked read; effects calling this rerun on invalidation
    pub fn version(&self, key: &'static str) -> u64 {
        self.versions.with(|v| v.version(key))
    }

    pub fn invalidate(&self, key: &'static str) {
        log::debug!("invalidate {key}");
        self.versions.update(|v| v.invalidate(key));
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_query_cache() -> QueryCache {
    use_context::<QueryCache>().expect("QueryCache not provided")
}

/// Request counter of one query; only the newest request may apply its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    /// Starts a request and returns its ticket
    pub fn start(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// A fetched collection with its loading/error state.
#[derive(Debug)]
pub struct ListQuery<T: Send + Sync + 'static> {
    pub items: RwSignal<Vec<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl<T: Send + Sync + 'static> Clone for ListQuery<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListQuery<T> {}

impl<T: Clone + Send + Sync + 'static> ListQuery<T> {
    fn empty() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// Fetches whenever `key` is invalidated or a signal read by `fetch` changes.
    pub fn watch<F, Fut>(key: &'static str, fetch: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
    {
        let query = Self::empty();
        let cache = use_query_cache();
        let generation = StoredValue::new(RequestGeneration::default());
        Effect::new(move |_| {
            cache.version(key);
            let pending = fetch();
            let mut current = generation.get_value();
            let ticket = current.start();
            generation.set_value(current);
            query.loading.set(true);
            spawn_local(async move {
                let result = pending.await;
                // a newer request owns the list now
                if !generation.with_value(|g| g.is_latest(ticket)) {
                    log::debug!("Dropping stale response for {key}");
                    return;
                }
                match result {
                    Ok(items) => {
                        query.items.set(items);
                        query.error.set(None);
                    }
                    Err(ApiError::Unauthorized) => {}
                    Err(e) => {
                        log::warn!("Failed to load {key}: {e}");
                        query.error.set(Some(e.to_string()));
                    }
                }
                query.loading.set(false);
            });
        });
        query
    }
}

impl<E: Resource> ListQuery<E> {
    /// `GET /{collection}`, refetched on invalidation
    pub fn of() -> Self {
        Self::watch(E::collection_name(), crud_api::list::<E>)
    }

    /// Active records, for pickers
    pub fn active(&self) -> Vec<E> {
        self.items
            .with(|items| items.iter().filter(|e| e.is_active()).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_request_applies() {
        let mut generation = RequestGeneration::default();
        let week_one = generation.start();
        let week_two = generation.start();
        assert!(!generation.is_latest(week_one));
        assert!(generation.is_latest(week_two));

        let refetch = generation.start();
        assert!(!generation.is_latest(week_two));
        assert!(generation.is_latest(refetch));
    }

    #[test]
    fn test_versions() {
        let mut v = CacheVersions::default();
        assert_eq!(v.version("setores"), 0);
        v.invalidate("setores");
        v.invalidate("setores");
        v.invalidate("cargos");
        assert_eq!(v.version("setores"), 2);
        assert_eq!(v.version("cargos"), 1);
        assert_eq!(v.version("etapas"), 0);
    }
}
