use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::Future;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Configuration for request deduplication
#[derive(Clone, Debug)]
pub struct DeduplicationConfig {
    /// How long to keep pending requests before timing out
    pub request_timeout: Duration,
    /// Whether deduplication is enabled
    pub enabled: bool,
}

impl Default for DeduplicationConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::seconds(60),
            enabled: true,
        }
    }
}

type Waiter<V> = oneshot::Sender<Result<V>>;

struct PendingRequest<V> {
    /// Distinguishes this request from a later one registered under the same key
    id: u64,
    started_at: DateTime<Utc>,
    waiters: Vec<Waiter<V>>,
}

/// Request deduplication system
/// When multiple identical requests come in, only the first one is executed
/// and the result is shared with all waiting requests. The pending entry is
/// cleared as soon as the request settles, whether it succeeded or not.
pub struct RequestDeduplicator<K, V> {
    /// Map of keys to pending requests
    pending: Arc<DashMap<K, PendingRequest<V>>>,
    next_id: AtomicU64,
    config: DeduplicationConfig,
}

impl<K, V> RequestDeduplicator<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(config: DeduplicationConfig) -> Self {
        Self {
            pending: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(0),
            config,
        }
    }

    /// Execute an operation with deduplication
    /// If the same key is already in progress, wait for its result.
    /// Otherwise run the operation on its own task and hand the result to
    /// everyone who joined in the meantime. Because the operation runs on a
    /// separate task it completes even if the calling future is dropped.
    pub async fn execute<F, Fut>(&self, key: K, fetch_fn: F) -> Result<V>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        if !self.config.enabled {
            return fetch_fn().await;
        }

        // Clean up expired requests first
        self.cleanup_expired();

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let receiver = match self.pending.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                log::debug!("Request already pending for key: {:?}", key);
                let (tx, rx) = oneshot::channel();
                entry.get_mut().waiters.push(tx);
                Some(rx)
            }
            Entry::Vacant(entry) => {
                entry.insert(PendingRequest {
                    id,
                    started_at: Utc::now(),
                    waiters: Vec::new(),
                });
                None
            }
        };

        if let Some(rx) = receiver {
            return self.wait(&key, rx).await;
        }

        log::debug!("Executing new request for key: {:?}", key);
        let pending = Arc::clone(&self.pending);
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let result = fetch_fn().await;

            // Notify all waiting requests and clean up
            if let Some((_, request)) = pending.remove_if(&task_key, |_, request| request.id == id) {
                log::debug!(
                    "Notifying {} waiters for key: {:?}",
                    request.waiters.len(),
                    task_key
                );
                for waiter in request.waiters {
                    let _ = waiter.send(result.clone());
                }
            }
            result
        });

        match handle.await {
            Ok(result) => result,
            Err(err) => {
                log::warn!("Request task for key {:?} failed: {}", key, err);
                self.pending.remove_if(&key, |_, request| request.id == id);
                Err(DeduplicationError::TaskFailed.into())
            }
        }
    }

    async fn wait(&self, key: &K, rx: oneshot::Receiver<Result<V>>) -> Result<V> {
        let timeout = self
            .config
            .request_timeout
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);

        // Wait for the result with timeout
        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(result)) => {
                log::debug!("Received deduplicated result for key: {:?}", key);
                result
            }
            Ok(Err(_)) => {
                log::warn!("Sender dropped for key: {:?}", key);
                Err(Error::Deduplication(DeduplicationError::SenderDropped))
            }
            Err(_) => {
                log::warn!("Request timeout for key: {:?}", key);
                Err(Error::Deduplication(DeduplicationError::Timeout))
            }
        }
    }

    /// Whether a request for `key` is currently executing
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    /// Clean up expired pending requests. Their waiters observe
    /// [`DeduplicationError::SenderDropped`].
    fn cleanup_expired(&self) {
        let now = Utc::now();
        let timeout = self.config.request_timeout;
        self.pending.retain(|key, request| {
            let expired = (now - request.started_at) > timeout;
            if expired {
                log::debug!(
                    "Cleaning up expired request for key: {:?} with {} waiters",
                    key,
                    request.waiters.len()
                );
            }
            !expired
        });
    }

    /// Get statistics about pending requests
    pub fn stats(&self) -> DeduplicationStats {
        let pending_requests = self.pending.len();
        let total_waiters = self
            .pending
            .iter()
            .map(|entry| entry.value().waiters.len())
            .sum();

        DeduplicationStats {
            pending_requests,
            total_waiters,
        }
    }
}

/// Statistics for request deduplication
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeduplicationStats {
    pub pending_requests: usize,
    pub total_waiters: usize,
}

impl std::ops::Add for DeduplicationStats {
    type Output = DeduplicationStats;

    fn add(self, other: DeduplicationStats) -> DeduplicationStats {
        DeduplicationStats {
            pending_requests: self.pending_requests + other.pending_requests,
            total_waiters: self.total_waiters + other.total_waiters,
        }
    }
}

/// Errors that can occur during request deduplication
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeduplicationError {
    #[error("Request timed out")]
    Timeout,
    #[error("Sender was dropped")]
    SenderDropped,
    #[error("Request task failed")]
    TaskFailed,
}

/// Thread-safe wrapper for the deduplicator
pub type SharedRequestDeduplicator<K, V> = Arc<RequestDeduplicator<K, V>>;
