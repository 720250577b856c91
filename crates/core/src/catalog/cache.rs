//! Single-flight catalog cache.
//!
//! The cache is a three-state machine (`Empty`, `Loading`, `Ready`) guarding
//! one snapshot pointer. Concurrent `ensure_loaded` calls against a cold
//! cache join a single shared fetch future instead of racing their own
//! fetches, so the remote index is retrieved exactly once per load cycle and
//! every joined caller observes the same outcome.

use std::sync::{Arc, Mutex};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};

use super::snapshot::CatalogSnapshot;
use super::source::IndexSource;
use crate::error::Error;

type LoadFuture = Shared<BoxFuture<'static, Result<CatalogSnapshot, Error>>>;

enum LoadState {
    Empty,
    Loading(LoadFuture),
    Ready(CatalogSnapshot),
}

struct Inner {
    state: LoadState,
    /// Monotonic id of the most recently started fetch. A completed fetch
    /// only commits its outcome while it is still the newest one.
    epoch: u64,
}

/// In-memory catalog cache with single-flight index loading.
///
/// The mutex is only held for state-pointer swaps, never across an await.
pub struct CatalogCache {
    source: Arc<dyn IndexSource>,
    inner: Mutex<Inner>,
}

impl CatalogCache {
    pub fn new(source: Arc<dyn IndexSource>) -> Self {
        Self { source, inner: Mutex::new(Inner { state: LoadState::Empty, epoch: 0 }) }
    }

    /// Return the current snapshot, fetching the index if necessary.
    ///
    /// `Ready` returns immediately with no I/O. `Loading` joins the fetch
    /// already in flight rather than starting a second one. `Empty` starts
    /// exactly one fetch; on success the snapshot is stored, on failure the
    /// cache resets to `Empty` so a later call retries, and either way every
    /// joined caller sees the same outcome.
    pub async fn ensure_loaded(&self) -> Result<CatalogSnapshot, Error> {
        let (fut, epoch) = {
            let mut inner = self.inner.lock().expect("catalog cache lock poisoned");
            match &inner.state {
                LoadState::Ready(snapshot) => return Ok(snapshot.clone()),
                LoadState::Loading(fut) => (fut.clone(), inner.epoch),
                LoadState::Empty => {
                    let source = Arc::clone(&self.source);
                    let fut: LoadFuture = async move {
                        tracing::debug!("fetching catalog index");
                        match source.load_index().await {
                            Ok(records) => {
                                tracing::debug!("catalog index loaded: {} records", records.len());
                                Ok(CatalogSnapshot::new(records))
                            }
                            Err(e) => {
                                tracing::warn!("catalog index load failed: {}", e);
                                Err(e)
                            }
                        }
                    }
                    .boxed()
                    .shared();
                    inner.epoch += 1;
                    inner.state = LoadState::Loading(fut.clone());
                    (fut, inner.epoch)
                }
            }
        };

        let outcome = fut.await;
        self.commit(epoch, &outcome);
        outcome
    }

    /// Store a completed fetch outcome, last-writer-wins.
    ///
    /// Every caller joined on the same fetch commits the same outcome, so the
    /// assignment is idempotent. Outcomes of superseded fetches (a newer
    /// fetch has started since) are discarded.
    fn commit(&self, epoch: u64, outcome: &Result<CatalogSnapshot, Error>) {
        let mut inner = self.inner.lock().expect("catalog cache lock poisoned");
        if inner.epoch != epoch {
            return;
        }
        match outcome {
            Ok(snapshot) => inner.state = LoadState::Ready(snapshot.clone()),
            Err(_) => {
                if matches!(inner.state, LoadState::Loading(_)) {
                    inner.state = LoadState::Empty;
                }
            }
        }
    }

    /// Discard any stored snapshot and return to `Empty`.
    ///
    /// Does not cancel an in-flight fetch; when that fetch completes its
    /// result still lands (last-writer-wins) unless a newer fetch has
    /// superseded it. Discarding a `Ready` snapshot bumps the epoch so a
    /// straggling commit of the fetch that produced it cannot resurrect it.
    pub fn invalidate(&self) {
        let mut inner = self.inner.lock().expect("catalog cache lock poisoned");
        if matches!(inner.state, LoadState::Ready(_)) {
            inner.state = LoadState::Empty;
            inner.epoch += 1;
        }
    }

    /// Non-blocking peek at the current snapshot, if one is stored.
    pub fn snapshot(&self) -> Option<CatalogSnapshot> {
        match &self.inner.lock().expect("catalog cache lock poisoned").state {
            LoadState::Ready(snapshot) => Some(snapshot.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Dimensions, Record};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn make_record(id: &str) -> Record {
        Record {
            id: id.to_string(),
            file_name: format!("{id}.litematic"),
            display_name: id.to_string(),
            author: "tester".to_string(),
            time_created: 0,
            file_size_bytes: 0,
            size_label: String::new(),
            version: String::new(),
            dimensions: Dimensions::default(),
            has_preview: false,
            preview_url: None,
            download_url: format!("https://files.test/{id}.litematic"),
        }
    }

    /// Fake source that counts loads and can fail the first N of them.
    struct FakeSource {
        calls: AtomicUsize,
        delay: Duration,
        failures_remaining: AtomicUsize,
    }

    impl FakeSource {
        fn new(delay: Duration) -> Self {
            Self { calls: AtomicUsize::new(0), delay, failures_remaining: AtomicUsize::new(0) }
        }

        fn failing_first(delay: Duration, failures: usize) -> Self {
            Self { calls: AtomicUsize::new(0), delay, failures_remaining: AtomicUsize::new(failures) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IndexSource for FakeSource {
        async fn load_index(&self) -> Result<Vec<Record>, Error> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(self.delay).await;

            let remaining = self.failures_remaining.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
                return Err(Error::HttpStatus(500));
            }

            Ok(vec![make_record(&format!("load-{call}"))])
        }
    }

    #[tokio::test]
    async fn test_concurrent_cold_cache_fetches_once() {
        let source = Arc::new(FakeSource::new(Duration::from_millis(100)));
        let cache = Arc::new(CatalogCache::new(source.clone() as Arc<dyn IndexSource>));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move { cache.ensure_loaded().await }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            let snapshot = handle.await.unwrap().unwrap();
            ids.push(snapshot.records()[0].id.clone());
        }

        assert_eq!(source.calls(), 1);
        assert!(ids.iter().all(|id| id == "load-1"));
    }

    #[tokio::test]
    async fn test_ready_cache_returns_without_refetch() {
        let source = Arc::new(FakeSource::new(Duration::ZERO));
        let cache = CatalogCache::new(source.clone() as Arc<dyn IndexSource>);

        cache.ensure_loaded().await.unwrap();
        cache.ensure_loaded().await.unwrap();
        cache.ensure_loaded().await.unwrap();

        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_propagates_to_all_joined_callers() {
        let source = Arc::new(FakeSource::failing_first(Duration::from_millis(100), 1));
        let cache = Arc::new(CatalogCache::new(source.clone() as Arc<dyn IndexSource>));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move { cache.ensure_loaded().await }));
        }

        for handle in handles {
            let result = handle.await.unwrap();
            assert_eq!(result.unwrap_err(), Error::HttpStatus(500));
        }
        assert_eq!(source.calls(), 1);

        // Failed loads reset to Empty, so the next call retries and succeeds.
        let snapshot = cache.ensure_loaded().await.unwrap();
        assert_eq!(snapshot.records()[0].id, "load-2");
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = Arc::new(FakeSource::new(Duration::ZERO));
        let cache = CatalogCache::new(source.clone() as Arc<dyn IndexSource>);

        let first = cache.ensure_loaded().await.unwrap();
        cache.invalidate();
        assert!(cache.snapshot().is_none());

        let second = cache.ensure_loaded().await.unwrap();
        assert_eq!(source.calls(), 2);
        assert_eq!(first.records()[0].id, "load-1");
        assert_eq!(second.records()[0].id, "load-2");
    }

    #[tokio::test]
    async fn test_invalidate_does_not_cancel_inflight_fetch() {
        let source = Arc::new(FakeSource::new(Duration::from_millis(100)));
        let cache = Arc::new(CatalogCache::new(source.clone() as Arc<dyn IndexSource>));

        let task = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.ensure_loaded().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        cache.invalidate();

        let snapshot = task.await.unwrap().unwrap();
        assert_eq!(snapshot.records()[0].id, "load-1");
        assert_eq!(source.calls(), 1);

        // The in-flight result still landed in the cache.
        assert!(cache.snapshot().is_some());
    }

    #[tokio::test]
    async fn test_stale_commit_cannot_resurrect_invalidated_snapshot() {
        let source = Arc::new(FakeSource::new(Duration::ZERO));
        let cache = CatalogCache::new(source as Arc<dyn IndexSource>);

        let snapshot = cache.ensure_loaded().await.unwrap();
        cache.invalidate();

        // A straggling caller joined on the first fetch commits its outcome
        // after the invalidate; the epoch guard discards it.
        cache.commit(1, &Ok(snapshot));
        assert!(cache.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_snapshot_peek_is_none_on_cold_cache() {
        let source = Arc::new(FakeSource::new(Duration::ZERO));
        let cache = CatalogCache::new(source as Arc<dyn IndexSource>);
        assert!(cache.snapshot().is_none());
    }
}
