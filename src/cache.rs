//! In-memory query cache with in-flight deduplication.
//!
//! `fetch_query` runs the loader at most once per distinct key:
//! concurrent callers with the same key wait for the first loader and
//! share its page. Completed pages stay cached until invalidated;
//! failed or cancelled loads are not cached, so the next caller
//! retries. Retry policy beyond that is deliberately not this layer's
//! job.

use crate::api::ApiError;
use crate::types::ItemPage;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::trace;

/// Opaque cache key derived from request parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(pub String);

enum Slot {
    InFlight(watch::Receiver<bool>),
    Ready(ItemPage),
}

#[derive(Default)]
pub struct QueryCache {
    slots: Mutex<HashMap<QueryKey, Slot>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached page for `key`, or the result of running `loader` to fill it.
    pub async fn fetch_query<F, Fut>(
        &self,
        key: QueryKey,
        loader: F,
    ) -> Result<Option<ItemPage>, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<ItemPage>, ApiError>>,
    {
        let done_tx = loop {
            let mut rx = {
                let mut slots = self.slots.lock().unwrap();
                match slots.get(&key) {
                    Some(Slot::Ready(page)) => {
                        trace!(key = %key.0, "Cache hit");
                        return Ok(Some(page.clone()));
                    }
                    Some(Slot::InFlight(rx)) => rx.clone(),
                    None => {
                        let (tx, rx) = watch::channel(false);
                        slots.insert(key.clone(), Slot::InFlight(rx));
                        break tx;
                    }
                }
            };
            if rx.changed().await.is_err() {
                // Loader task died without reporting (dropped mid-flight).
                // Clear the stale slot so the next pass can own it.
                let mut slots = self.slots.lock().unwrap();
                if let Some(Slot::InFlight(cur)) = slots.get(&key) {
                    if cur.has_changed().is_err() {
                        slots.remove(&key);
                    }
                }
            }
        };

        let result = loader().await;
        {
            let mut slots = self.slots.lock().unwrap();
            match &result {
                Ok(Some(page)) => {
                    slots.insert(key.clone(), Slot::Ready(page.clone()));
                }
                // Absent listings and failures are not worth pinning
                _ => {
                    slots.remove(&key);
                }
            }
        }
        let _ = done_tx.send(true);
        result
    }

    /// Drop every cached page whose key starts with `prefix`
    pub fn invalidate_prefix(&self, prefix: &str) {
        let mut slots = self.slots.lock().unwrap();
        slots.retain(|key, slot| !(key.0.starts_with(prefix) && matches!(slot, Slot::Ready(_))));
    }

    #[cfg(test)]
    fn ready_len(&self) -> usize {
        self.slots
            .lock()
            .unwrap()
            .values()
            .filter(|s| matches!(s, Slot::Ready(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LibraryItem;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn page(total: u64) -> ItemPage {
        ItemPage {
            items: vec![LibraryItem {
                id: "1".into(),
                name: "Kind of Blue".into(),
                ..Default::default()
            }],
            total_record_count: total,
        }
    }

    #[tokio::test]
    async fn identical_keys_hit_the_cache() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        for _ in 0..3 {
            let got = cache
                .fetch_query(QueryKey("albums:s1:q=:0:50".into()), || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Some(page(1)))
                })
                .await
                .unwrap();
            assert_eq!(got.unwrap().total_record_count, 1);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.ready_len(), 1);
    }

    #[tokio::test]
    async fn distinct_keys_load_independently() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        for start in [0usize, 50] {
            cache
                .fetch_query(QueryKey(format!("albums:s1:q=:{start}:50")), || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Some(page(100)))
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.ready_len(), 2);
    }

    #[tokio::test]
    async fn concurrent_identical_keys_share_one_loader() {
        let cache = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .fetch_query(QueryKey("songs:s1:q=:0:100".into()), || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        Ok(Some(page(7)))
                    })
                    .await
            }));
        }
        for handle in handles {
            let got = handle.await.unwrap().unwrap();
            assert_eq!(got.unwrap().total_record_count, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let err = cache
            .fetch_query(QueryKey("k".into()), || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::Cancelled)
            })
            .await;
        assert!(err.is_err());

        let ok = cache
            .fetch_query(QueryKey("k".into()), || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Some(page(3)))
            })
            .await
            .unwrap();
        assert_eq!(ok.unwrap().total_record_count, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_prefix_clears_matching_pages() {
        let cache = QueryCache::new();
        for key in ["albums:s1:a", "albums:s1:b", "songs:s1:a"] {
            cache
                .fetch_query(QueryKey(key.into()), || async move { Ok(Some(page(1))) })
                .await
                .unwrap();
        }
        cache.invalidate_prefix("albums:");
        assert_eq!(cache.ready_len(), 1);
    }
}
