use crate::cache::{CacheStats, QueryCache, QueryKey};
use crate::deduplication::{DeduplicationConfig, DeduplicationStats, RequestDeduplicator};
use crate::error::Result;
use chrono::Duration;
use futures::Future;
use getset::{CopyGetters, Getters};
use std::sync::Arc;

/// A query result and whether it was served without calling upstream.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct Fetched<T> {
    #[getset(get = "pub")]
    value: T,
    #[getset(get_copy = "pub")]
    from_cache: bool,
}

impl<T> Fetched<T> {
    pub fn cached(value: T) -> Self {
        Self {
            value,
            from_cache: true,
        }
    }

    pub fn fresh(value: T) -> Self {
        Self {
            value,
            from_cache: false,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Outcome of a query that can be switched off by a missing parameter.
#[derive(Debug, Clone)]
pub enum QueryState<T> {
    /// Not issued: nothing was fetched and no cache entry exists.
    Disabled,
    Fetched(Fetched<T>),
}

impl<T> QueryState<T> {
    pub fn is_disabled(&self) -> bool {
        matches!(self, QueryState::Disabled)
    }

    pub fn fetched(self) -> Option<Fetched<T>> {
        match self {
            QueryState::Disabled => None,
            QueryState::Fetched(fetched) => Some(fetched),
        }
    }

    pub fn value(self) -> Option<T> {
        self.fetched().map(Fetched::into_value)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub retries: u32,
    pub delay: std::time::Duration,
}

impl RetryPolicy {
    /// Runs `op` until it succeeds or `retries` extra attempts have failed.
    pub async fn run<T, F, Fut>(&self, key: &QueryKey, op: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.retries => {
                    attempt += 1;
                    log::warn!(
                        "Query {} failed ({}), retry {}/{}",
                        key,
                        err,
                        attempt,
                        self.retries
                    );
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                }
                Err(err) => {
                    log::warn!("Query {} failed after {} attempts: {}", key, attempt + 1, err);
                    return Err(err);
                }
            }
        }
    }
}

/// Cache, de-duplication and retry for every query producing `V`.
pub(crate) struct Query<V> {
    cache: Arc<QueryCache<V>>,
    // The flag records whether the leader found the value already cached.
    deduplicator: RequestDeduplicator<QueryKey, (V, bool)>,
    stale_time: Duration,
    retry: RetryPolicy,
}

impl<V> Query<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(
        enabled: bool,
        stale_time: Duration,
        retry: RetryPolicy,
        deduplication: DeduplicationConfig,
    ) -> Self {
        Self {
            cache: Arc::new(QueryCache::new(enabled)),
            deduplicator: RequestDeduplicator::new(deduplication),
            stale_time,
            retry,
        }
    }

    /// Serves `key` from cache while fresh, otherwise runs `op` once for all
    /// concurrent callers and caches a successful result.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, op: F) -> Result<Fetched<V>>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        if let Some(value) = self.cache.get(&key) {
            return Ok(Fetched::cached(value));
        }
        self.fetch_uncached(key, op).await
    }

    // A leader that settled between the cache check above and this caller
    // registering has already cached its result, so the leader checks again.
    async fn fetch_uncached<F, Fut>(&self, key: QueryKey, op: F) -> Result<Fetched<V>>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let cache = Arc::clone(&self.cache);
        let stale_time = self.stale_time;
        let retry = self.retry;
        let task_key = key.clone();

        let (value, from_cache) = self
            .deduplicator
            .execute(key, move || async move {
                if let Some(value) = cache.get(&task_key) {
                    log::debug!("Query {} filled while waiting, skipping fetch", task_key);
                    return Ok((value, true));
                }
                let value = retry.run(&task_key, op).await?;
                cache.put(task_key, value.clone(), stale_time);
                Ok((value, false))
            })
            .await?;

        Ok(if from_cache {
            Fetched::cached(value)
        } else {
            Fetched::fresh(value)
        })
    }

    pub fn invalidate(&self, key: &QueryKey) -> bool {
        self.cache.invalidate(key)
    }

    pub fn in_flight(&self, key: &QueryKey) -> bool {
        self.deduplicator.is_pending(key)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn deduplication_stats(&self) -> DeduplicationStats {
        self.deduplicator.stats()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn evict_expired(&self) -> usize {
        self.cache.evict_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn policy(retries: u32) -> RetryPolicy {
        RetryPolicy {
            retries,
            delay: std::time::Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_retry_stops_on_success() {
        let attempts = AtomicUsize::new(0);
        let value = policy(3)
            .run(&QueryKey::Movies, || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Error>(7)
            })
            .await
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_limit() {
        let attempts = AtomicUsize::new(0);
        let err = policy(1)
            .run(&QueryKey::Movies, || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(Error::UpstreamUnavailable("down".into()))
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::UpstreamUnavailable);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_recovers_on_second_attempt() {
        let attempts = AtomicUsize::new(0);
        let value = policy(1)
            .run(&QueryKey::Users, || async {
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(Error::UpstreamUnavailable("flaky".into()))
                } else {
                    Ok(3)
                }
            })
            .await
            .unwrap();
        assert_eq!(value, 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_leader_uses_value_cached_after_first_check() {
        let query: Query<u32> = Query::new(
            true,
            Duration::minutes(5),
            policy(0),
            DeduplicationConfig::default(),
        );
        let calls = Arc::new(AtomicUsize::new(0));
        let op = {
            let calls = Arc::clone(&calls);
            move || {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, Error>(2)
                }
            }
        };

        // Another leader settles after this caller's cache check missed.
        query.cache.put(QueryKey::Users, 1, Duration::minutes(5));
        let fetched = query.fetch_uncached(QueryKey::Users, op.clone()).await.unwrap();
        assert_eq!(*fetched.value(), 1);
        assert!(fetched.from_cache());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        query.invalidate(&QueryKey::Users);
        let fetched = query.fetch(QueryKey::Users, op).await.unwrap();
        assert_eq!(*fetched.value(), 2);
        assert!(!fetched.from_cache());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_query_state_accessors() {
        let disabled: QueryState<u32> = QueryState::Disabled;
        assert!(disabled.is_disabled());
        assert_eq!(disabled.value(), None);

        let state = QueryState::Fetched(Fetched::cached(4));
        let fetched = state.fetched().unwrap();
        assert!(fetched.from_cache());
        assert_eq!(*fetched.value(), 4);
    }
}
