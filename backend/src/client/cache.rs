//! Short-lived cache for read-heavy lists.
//!
//! A [`TtlCache`] holds at most one payload together with the time it was
//! captured and the filter key it was fetched for. A payload is served only
//! while it is younger than the TTL and the requested key matches; anything
//! else goes back to the fetcher. Failed fetches degrade to an empty payload
//! and leave the cache untouched.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Time source for cache freshness checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry<T, K> {
    payload: Arc<T>,
    captured_at: Instant,
    filter: K,
}

pub struct TtlCache<T, K = ()> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entry: Option<CacheEntry<T, K>>,
}

impl<T, K> TtlCache<T, K>
where
    T: Default,
    K: PartialEq,
{
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { ttl, clock, entry: None }
    }

    /// The cached payload, if it is still fresh for `filter`.
    pub fn get_fresh(&self, filter: &K) -> Option<Arc<T>> {
        let entry = self.entry.as_ref()?;
        let age = self.clock.now().saturating_duration_since(entry.captured_at);
        if age < self.ttl && entry.filter == *filter {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    /// Return the fresh payload for `filter`, or run `fetch` and cache its result.
    pub async fn get_or_fetch<F, Fut, E>(&mut self, filter: K, fetch: F) -> Arc<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        if let Some(payload) = self.get_fresh(&filter) {
            return payload;
        }

        match fetch().await {
            Ok(value) => {
                let payload = Arc::new(value);
                self.entry = Some(CacheEntry {
                    payload: payload.clone(),
                    captured_at: self.clock.now(),
                    filter,
                });
                payload
            }
            Err(e) => {
                tracing::warn!("Cache fetch failed, serving empty result: {}", e);
                Arc::new(T::default())
            }
        }
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
