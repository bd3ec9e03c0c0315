//! # Query Cache
//!
//! Request deduplication for the data layer. Components never talk to the
//! network directly; they call [`QueryCache::use_query`] with a key and get
//! back a `watch::Receiver` that is pushed the query's status as it settles.
//!
//! ```text
//!   Page (prefetch) ──┐
//!                     ├── use_query(AllPosts) ──► entry exists? ── yes ──► subscribe
//!   FeedList ─────────┘                               │
//!                                                     no
//!                                                     ▼
//!                                        spawn fetch, store sender
//! ```
//!
//! The first caller for a key starts the fetch; every later caller shares the
//! same in-flight (or settled) entry. Entries are never evicted and settled
//! queries are never refetched.
//!
//! The cache keeps each entry's sender, so a receiver's `has_changed()` stays
//! usable for as long as the cache lives. A new subscriber starts out having
//! seen the current status: read it with `borrow_and_update()` first.

use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use futures::future::BoxFuture;
use log::{debug, info, warn};
use tokio::sync::watch;

/// Error text recorded when a fetch panics instead of returning.
pub const QUERY_PANICKED: &str = "query panicked";

/// Identity of a query. Two calls with equal keys share one request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `posts.getAll`: every post joined with its author.
    AllPosts,
}

impl QueryKey {
    pub fn name(&self) -> &'static str {
        match self {
            QueryKey::AllPosts => "posts.getAll",
        }
    }
}

/// Observable state of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus<T> {
    Pending,
    Error(String),
    Success(T),
}

impl<T> QueryStatus<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryStatus::Pending)
    }

    /// The settled value, if any. `None` both while pending and on error.
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryStatus::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Shared, keyed cache of query results.
///
/// Owned by the data layer and handed to components by reference; there is
/// no global instance.
pub struct QueryCache<T> {
    entries: Mutex<HashMap<QueryKey, Arc<watch::Sender<QueryStatus<T>>>>>,
    fetches: AtomicUsize,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fetches: AtomicUsize::new(0),
        }
    }
}

impl<T> QueryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `key`, starting `fetch` only if nobody has asked before.
    ///
    /// `fetch` is not called at all on a cache hit. Must be called from
    /// within a Tokio runtime.
    pub fn use_query<F, Fut, E>(&self, key: QueryKey, fetch: F) -> watch::Receiver<QueryStatus<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: std::fmt::Display,
    {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = entries.get(&key) {
            debug!("Query '{}' already cached, sharing entry", key.name());
            return existing.subscribe();
        }

        let (tx, rx) = watch::channel(QueryStatus::Pending);
        let tx = Arc::new(tx);
        entries.insert(key.clone(), Arc::clone(&tx));
        drop(entries);

        let count = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Starting query '{}' (fetch #{})", key.name(), count);

        // A panicking fetch still settles the entry, or observers would wait forever
        let request: BoxFuture<'static, QueryStatus<T>> = AssertUnwindSafe(fetch())
            .catch_unwind()
            .map(move |outcome| match outcome {
                Ok(Ok(value)) => QueryStatus::Success(value),
                Ok(Err(e)) => {
                    warn!("Query '{}' failed: {}", key.name(), e);
                    QueryStatus::Error(e.to_string())
                }
                Err(_) => {
                    warn!("Query '{}' panicked", key.name());
                    QueryStatus::Error(QUERY_PANICKED.to_string())
                }
            })
            .boxed();

        tokio::spawn(async move {
            let status = request.await;
            if tx.receiver_count() == 0 {
                debug!("Query settled with no observers");
            }
            // Stored even without observers so later subscribers see it
            tx.send_replace(status);
        });

        rx
    }

    /// Current status for `key` without subscribing or fetching.
    pub fn peek(&self, key: &QueryKey) -> Option<QueryStatus<T>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).map(|tx| tx.borrow().clone())
    }

    /// Number of fetches started since creation.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_shares_one_fetch() {
        let cache: QueryCache<Vec<u32>> = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let make_fetch = |calls: Arc<AtomicUsize>| {
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, String>(vec![1, 2, 3]) }
            }
        };

        let mut first = cache.use_query(QueryKey::AllPosts, make_fetch(calls.clone()));
        let mut second = cache.use_query(QueryKey::AllPosts, make_fetch(calls.clone()));

        assert_eq!(cache.fetch_count(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        first.changed().await.unwrap();
        assert_eq!(first.borrow().data(), Some(&vec![1, 2, 3]));
        // The second observer sees the same settled value
        second.changed().await.unwrap();
        assert_eq!(*second.borrow(), QueryStatus::Success(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_starts_pending() {
        let cache: QueryCache<u8> = QueryCache::new();
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();

        let rx = cache.use_query(QueryKey::AllPosts, move || async move {
            let _ = release_rx.await;
            Ok::<_, String>(7)
        });

        assert!(rx.borrow().is_loading());
        assert_eq!(rx.borrow().data(), None);
        assert_eq!(cache.peek(&QueryKey::AllPosts), Some(QueryStatus::Pending));

        release_tx.send(()).unwrap();
    }

    #[tokio::test]
    async fn test_failure_settles_to_error() {
        let cache: QueryCache<u8> = QueryCache::new();
        let mut rx = cache.use_query(QueryKey::AllPosts, || async {
            Err::<u8, _>("connection refused")
        });

        rx.changed().await.unwrap();
        let status = rx.borrow().clone();
        assert!(!status.is_loading());
        assert_eq!(status.data(), None);
        assert_eq!(status, QueryStatus::Error("connection refused".to_string()));
    }

    #[tokio::test]
    async fn test_panicking_fetch_settles_to_error() {
        let cache: QueryCache<u8> = QueryCache::new();
        let broken = true;
        let mut rx = cache.use_query(QueryKey::AllPosts, move || async move {
            if broken {
                panic!("decoder blew up");
            }
            Ok::<_, String>(1)
        });

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), QueryStatus::Error(QUERY_PANICKED.to_string()));
        assert_eq!(
            cache.peek(&QueryKey::AllPosts),
            Some(QueryStatus::Error(QUERY_PANICKED.to_string()))
        );
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_settled_value_without_refetch() {
        let cache: QueryCache<u8> = QueryCache::new();
        let mut rx = cache.use_query(QueryKey::AllPosts, || async { Ok::<_, String>(1) });
        rx.changed().await.unwrap();

        let late = cache.use_query(QueryKey::AllPosts, || async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, String>(2)
        });

        assert_eq!(*late.borrow(), QueryStatus::Success(1));
        assert_eq!(cache.fetch_count(), 1);
    }

    #[test]
    fn test_peek_unknown_key_is_none() {
        let cache: QueryCache<u8> = QueryCache::new();
        assert!(cache.peek(&QueryKey::AllPosts).is_none());
        assert_eq!(QueryKey::AllPosts.name(), "posts.getAll");
    }
}
