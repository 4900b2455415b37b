pub mod browse;
pub mod cache;
pub mod catalog;
mod config;
pub mod deduplication;
mod error;
mod fetcher;
mod movie;
mod query;
pub mod transform;
mod upstream;
pub mod user_lists;


use cache::{CacheConfig, CacheStats, QueryKey};
use deduplication::{DeduplicationConfig, DeduplicationStats};
use query::{Query, RetryPolicy};
use std::sync::Arc;

pub use config::{CacheSettings, CatalogConfig, DeduplicationSettings};
pub use error::{Error, ErrorKind, Result};
pub use fetcher::Fetcher;
pub use movie::{Genre, Movie, RawResource, Review, User};
pub use query::{Fetched, QueryState};
pub use upstream::{HttpUpstream, Upstream, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Movie catalog queries with caching, request de-duplication and retry.
#[derive(Clone)]
pub struct CatalogClient {
    fetcher: Fetcher,
    movies: Arc<Query<Arc<Vec<Movie>>>>,
    movie: Arc<Query<Arc<Movie>>>,
    users: Arc<Query<Arc<Vec<User>>>>,
}

impl CatalogClient {
    /// Client against the public placeholder API with default settings
    pub fn new() -> Result<Self> {
        Self::with_cache(CacheConfig::default())
    }

    /// Client against the public placeholder API with the given cache settings
    pub fn with_cache(cache_config: CacheConfig) -> Result<Self> {
        let upstream = HttpUpstream::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)?;
        Ok(Self::with_upstream(
            Arc::new(upstream),
            cache_config,
            DeduplicationConfig::default(),
        ))
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let upstream = HttpUpstream::new(config.base_url(), config.timeout())?;
        log::info!(
            "Initialized CatalogClient for {} (cache enabled: {})",
            config.base_url(),
            config.cache().enabled()
        );
        Ok(Self::with_upstream(
            Arc::new(upstream),
            config.cache_config(),
            config.deduplication_config(),
        ))
    }

    pub fn with_upstream(
        upstream: Arc<dyn Upstream>,
        cache_config: CacheConfig,
        deduplication: DeduplicationConfig,
    ) -> Self {
        let retry = RetryPolicy {
            retries: cache_config.retry,
            delay: cache_config.retry_delay.to_std().unwrap_or_default(),
        };
        let enabled = cache_config.enabled;

        Self {
            fetcher: Fetcher::new(upstream),
            movies: Arc::new(Query::new(
                enabled,
                cache_config.movies_stale_time,
                retry,
                deduplication.clone(),
            )),
            movie: Arc::new(Query::new(
                enabled,
                cache_config.movie_stale_time,
                retry,
                deduplication.clone(),
            )),
            users: Arc::new(Query::new(
                enabled,
                cache_config.users_stale_time,
                retry,
                deduplication,
            )),
        }
    }

    /// Full listing, at most 20 movies
    pub async fn movies(&self) -> Result<Fetched<Arc<Vec<Movie>>>> {
        let fetcher = self.fetcher.clone();
        self.movies
            .fetch(QueryKey::Movies, move || {
                let fetcher = fetcher.clone();
                async move { fetcher.list_all().await.map(Arc::new) }
            })
            .await
    }

    /// Detail page for `id`. `None` (or `0`) leaves the query disabled:
    /// nothing is fetched and nothing is cached.
    pub async fn movie(&self, id: Option<u32>) -> Result<QueryState<Arc<Movie>>> {
        let id = match id {
            Some(id) if id > 0 => id,
            _ => {
                log::debug!("Movie query disabled: no id");
                return Ok(QueryState::Disabled);
            }
        };

        let fetcher = self.fetcher.clone();
        let fetched = self
            .movie
            .fetch(QueryKey::Movie(id), move || {
                let fetcher = fetcher.clone();
                async move { fetcher.get_one(id).await.map(Arc::new) }
            })
            .await?;
        Ok(QueryState::Fetched(fetched))
    }

    pub async fn movies_by_genre(&self, genre: &str) -> Result<Fetched<Arc<Vec<Movie>>>> {
        let fetcher = self.fetcher.clone();
        let genre = genre.to_string();
        self.movies
            .fetch(QueryKey::MoviesByGenre(genre.clone()), move || {
                let fetcher = fetcher.clone();
                let genre = genre.clone();
                async move { fetcher.list_by_genre(&genre).await.map(Arc::new) }
            })
            .await
    }

    /// The five movies shown in the home page hero
    pub async fn featured_movies(&self) -> Result<Fetched<Arc<Vec<Movie>>>> {
        let fetcher = self.fetcher.clone();
        self.movies
            .fetch(QueryKey::FeaturedMovies, move || {
                let fetcher = fetcher.clone();
                async move { fetcher.list_featured().await.map(Arc::new) }
            })
            .await
    }

    pub async fn search_movies(&self, term: &str) -> Result<Fetched<Arc<Vec<Movie>>>> {
        let fetcher = self.fetcher.clone();
        let term = term.to_string();
        self.movies
            .fetch(QueryKey::SearchMovies(term.clone()), move || {
                let fetcher = fetcher.clone();
                let term = term.clone();
                async move { fetcher.search(&term).await.map(Arc::new) }
            })
            .await
    }

    pub async fn users(&self) -> Result<Fetched<Arc<Vec<User>>>> {
        let fetcher = self.fetcher.clone();
        self.users
            .fetch(QueryKey::Users, move || {
                let fetcher = fetcher.clone();
                async move { fetcher.users().await.map(Arc::new) }
            })
            .await
    }

    /// Drop the cached result for `key`. Returns whether one existed.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        match key {
            QueryKey::Movie(_) => self.movie.invalidate(key),
            QueryKey::Users => self.users.invalidate(key),
            _ => self.movies.invalidate(key),
        }
    }

    /// Whether a fetch for `key` is currently running
    pub fn in_flight(&self, key: &QueryKey) -> bool {
        match key {
            QueryKey::Movie(_) => self.movie.in_flight(key),
            QueryKey::Users => self.users.in_flight(key),
            _ => self.movies.in_flight(key),
        }
    }

    /// Get cache statistics across all queries
    pub fn cache_stats(&self) -> CacheStats {
        self.movies.cache_stats() + self.movie.cache_stats() + self.users.cache_stats()
    }

    pub fn deduplication_stats(&self) -> DeduplicationStats {
        self.movies.deduplication_stats()
            + self.movie.deduplication_stats()
            + self.users.deduplication_stats()
    }

    /// Clear every cached result
    pub fn clear_cache(&self) {
        self.movies.clear();
        self.movie.clear();
        self.users.clear();
    }

    /// Evict stale cache entries. Returns how many were removed.
    pub fn evict_expired_cache(&self) -> usize {
        self.movies.evict_expired() + self.movie.evict_expired() + self.users.evict_expired()
    }
}
