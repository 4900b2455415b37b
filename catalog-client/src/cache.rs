use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "graphql")]
use async_graphql::SimpleObject;

/// Configuration for the query cache
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// How long listing results (all, by genre, featured, search) stay fresh
    pub movies_stale_time: Duration,
    /// How long a movie detail stays fresh. Zero means every read refetches.
    pub movie_stale_time: Duration,
    /// How long the user listing stays fresh
    pub users_stale_time: Duration,
    /// Additional attempts after a failed fetch
    pub retry: u32,
    /// Pause before each retry
    pub retry_delay: Duration,
    /// Whether caching is enabled
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            movies_stale_time: Duration::minutes(5),
            movie_stale_time: Duration::zero(),
            users_stale_time: Duration::minutes(10),
            retry: 1,
            retry_delay: Duration::seconds(1),
            enabled: true,
        }
    }
}

impl CacheConfig {
    /// Create a configuration with one stale time for every query
    pub fn new(stale_time: Duration, retry: u32) -> Self {
        Self {
            movies_stale_time: stale_time,
            movie_stale_time: stale_time,
            users_stale_time: stale_time,
            retry,
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Cached query result with metadata
#[derive(Clone, Debug)]
pub struct CachedResult<V> {
    pub data: V,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl<V> CachedResult<V> {
    pub fn new(data: V, ttl: Duration) -> Self {
        Self {
            data,
            created_at: Utc::now(),
            ttl,
        }
    }

    /// Check if the cached result is still fresh
    pub fn is_valid(&self) -> bool {
        Utc::now() < self.created_at + self.ttl
    }
}

/// Composite key identifying a query: the operation name plus its arguments.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum QueryKey {
    Movies,
    Movie(u32),
    MoviesByGenre(String),
    FeaturedMovies,
    SearchMovies(String),
    Users,
}

impl QueryKey {
    pub fn parts(&self) -> Vec<String> {
        match self {
            QueryKey::Movies => vec!["movies".into()],
            QueryKey::Movie(id) => vec!["movie".into(), id.to_string()],
            QueryKey::MoviesByGenre(genre) => {
                vec!["movies".into(), "genre".into(), genre.clone()]
            }
            QueryKey::FeaturedMovies => vec!["movies".into(), "featured".into()],
            QueryKey::SearchMovies(term) => vec!["movies".into(), "search".into(), term.clone()],
            QueryKey::Users => vec!["users".into()],
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.parts();
        match serde_json::to_string(&parts) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", parts),
        }
    }
}

/// In-memory cache using DashMap for thread safety. Entries are never evicted
/// for size; they leave when read after going stale, or when invalidated.
pub struct QueryCache<V> {
    cache: DashMap<QueryKey, CachedResult<V>>,
    enabled: bool,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(enabled: bool) -> Self {
        Self {
            cache: DashMap::new(),
            enabled,
        }
    }

    /// Get cached result if available and fresh
    pub fn get(&self, key: &QueryKey) -> Option<V> {
        if !self.enabled {
            return None;
        }

        if let Some(cached) = self.cache.get(key) {
            if cached.is_valid() {
                log::debug!("Cache hit for key: {}", key);
                return Some(cached.data.clone());
            }
        }

        // The read guard is gone by now, so removing cannot deadlock.
        if self.cache.remove_if(key, |_, cached| !cached.is_valid()).is_some() {
            log::debug!("Cache entry stale for key: {}", key);
        } else {
            log::debug!("Cache miss for key: {}", key);
        }
        None
    }

    /// Store result in cache
    pub fn put(&self, key: QueryKey, data: V, ttl: Duration) {
        if !self.enabled {
            return;
        }

        log::debug!("Stored in cache with key: {}", key);
        self.cache.insert(key, CachedResult::new(data, ttl));
    }

    /// Drop the entry for `key`. Returns whether there was one.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let removed = self.cache.remove(key).is_some();
        if removed {
            log::debug!("Invalidated cache key: {}", key);
        }
        removed
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.cache.contains_key(key)
    }

    /// Remove stale entries from cache
    pub fn evict_expired(&self) -> usize {
        let before = self.cache.len();
        self.cache.retain(|_, cached| cached.is_valid());
        let evicted = before.saturating_sub(self.cache.len());
        log::debug!("Evicted {} expired cache entries", evicted);
        evicted
    }

    /// Clear all cache entries
    pub fn clear(&self) {
        self.cache.clear();
        log::info!("Cache cleared");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let total_entries = self.cache.len();
        let expired_entries = self
            .cache
            .iter()
            .filter(|entry| !entry.value().is_valid())
            .count();

        CacheStats {
            total_entries,
            valid_entries: total_entries - expired_entries,
            expired_entries,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(SimpleObject))]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
}

impl std::ops::Add for CacheStats {
    type Output = CacheStats;

    fn add(self, other: CacheStats) -> CacheStats {
        CacheStats {
            total_entries: self.total_entries + other.total_entries,
            valid_entries: self.valid_entries + other.valid_entries,
            expired_entries: self.expired_entries + other.expired_entries,
        }
    }
}
