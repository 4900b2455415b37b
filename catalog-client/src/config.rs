use crate::cache::CacheConfig;
use crate::deduplication::DeduplicationConfig;
use crate::error::Result;
use crate::upstream::DEFAULT_BASE_URL;
use chrono::Duration;
use figment::providers::{Format, Yaml};
use figment::Figment;
use getset::Getters;
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use std::path::Path;

#[serde_inline_default]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct CatalogConfig {
    #[serde_inline_default(DEFAULT_BASE_URL.to_string())]
    base_url: String,
    #[serde_inline_default(10)]
    timeout_secs: u64,
    #[serde(default)]
    cache: CacheSettings,
    #[serde(default)]
    deduplication: DeduplicationSettings,
}

#[serde_inline_default]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct CacheSettings {
    #[serde_inline_default(true)]
    enabled: bool,
    #[serde_inline_default(300)]
    movies_stale_secs: i64,
    #[serde_inline_default(0)]
    movie_stale_secs: i64,
    #[serde_inline_default(600)]
    users_stale_secs: i64,
    #[serde_inline_default(1)]
    retry: u32,
    #[serde_inline_default(1000)]
    retry_delay_ms: i64,
}

#[serde_inline_default]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct DeduplicationSettings {
    #[serde_inline_default(true)]
    enabled: bool,
    #[serde_inline_default(60)]
    request_timeout_secs: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            cache: CacheSettings::default(),
            deduplication: DeduplicationSettings::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            movies_stale_secs: 300,
            movie_stale_secs: 0,
            users_stale_secs: 600,
            retry: 1,
            retry_delay_ms: 1000,
        }
    }
}

impl Default for DeduplicationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            request_timeout_secs: 60,
        }
    }
}

impl CatalogConfig {
    /// Loads the YAML file at `path`. A missing file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: CatalogConfig = Figment::new().merge(Yaml::file(path.as_ref())).extract()?;
        log::debug!("Loaded catalog config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(Figment::new().merge(Yaml::string(yaml)).extract()?)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::from(&self.cache)
    }

    pub fn deduplication_config(&self) -> DeduplicationConfig {
        DeduplicationConfig::from(&self.deduplication)
    }
}

impl From<&CacheSettings> for CacheConfig {
    fn from(settings: &CacheSettings) -> Self {
        Self {
            movies_stale_time: Duration::seconds(settings.movies_stale_secs.max(0)),
            movie_stale_time: Duration::seconds(settings.movie_stale_secs.max(0)),
            users_stale_time: Duration::seconds(settings.users_stale_secs.max(0)),
            retry: settings.retry,
            retry_delay: Duration::milliseconds(settings.retry_delay_ms.max(0)),
            enabled: settings.enabled,
        }
    }
}

impl From<&DeduplicationSettings> for DeduplicationConfig {
    fn from(settings: &DeduplicationSettings) -> Self {
        Self {
            request_timeout: Duration::seconds(settings.request_timeout_secs.max(0)),
            enabled: settings.enabled,
        }
    }
}
