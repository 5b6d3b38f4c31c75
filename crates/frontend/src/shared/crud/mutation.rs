use std::future::Future;

use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::notify::{use_notifier, Notifier};
use crate::shared::query_cache::{use_query_cache, QueryCache};

/// Runs one write against the backend at a time.
///
/// While a call is in flight `pending` is set and further calls are ignored.
/// On success the toast is shown, `on_success` runs, then the list under `key`
/// is invalidated. Failures end in an error toast; 401 has already redirected.
#[derive(Debug, Clone, Copy)]
pub struct Mutation {
    pub pending: RwSignal<bool>,
    key: &'static str,
    notifier: Notifier,
    cache: QueryCache,
}

impl Mutation {
    pub fn new(key: &'static str) -> Self {
        Self {
            pending: RwSignal::new(false),
            key,
            notifier: use_notifier(),
            cache: use_query_cache(),
        }
    }

    pub fn is_pending(&self) -> Signal<bool> {
        self.pending.into()
    }

    pub fn run<Fut, S>(self, label: &'static str, success: String, call: Fut, on_success: S)
    where
        Fut: Future<Output = Result<(), ApiError>> + 'static,
        S: FnOnce() + 'static,
    {
        if self.pending.get_untracked() {
            return;
        }
        self.pending.set(true);
        spawn_local(async move {
            let result = call.await;
            self.pending.set(false);
            match result {
                Ok(()) => {
                    self.notifier.success(success);
                    on_success();
                    self.cache.invalidate(self.key);
                }
                Err(ApiError::Unauthorized) => {}
                Err(e) => {
                    log::error!("{label} on {} failed: {e}", self.key);
                    self.notifier.error(e.to_string());
                }
            }
        });
    }
}
