use crate::error::{Error, Result};
use crate::movie::{RawResource, User};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use surf::{Client, Response, StatusCode, Url};
use utils::surf_logging::SurfLogging;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of the generic placeholder collections movies are built from.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// `GET /posts`, or `GET /posts?_limit=N` when a limit is given.
    async fn posts(&self, limit: Option<usize>) -> Result<Vec<RawResource>>;

    /// `GET /posts/{id}`. Fails with [`Error::NotFound`] for unknown ids.
    async fn post(&self, id: u32) -> Result<RawResource>;

    /// `GET /photos?_limit=N`.
    async fn photos(&self, limit: usize) -> Result<Vec<RawResource>>;

    /// `GET /users`.
    async fn users(&self) -> Result<Vec<User>>;
}

/// [`Upstream`] over HTTP with surf.
#[derive(Clone)]
pub struct HttpUpstream {
    http: Client,
}

impl HttpUpstream {
    /// `base_url` is the API root; request paths are joined onto it, so a
    /// base with a path prefix (`https://host/api`) keeps that prefix.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|err| Error::Config(format!("invalid base url {:?}: {}", base_url, err)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http: Client = surf::Config::new()
            .set_base_url(base)
            .set_timeout(Some(timeout))
            .try_into()
            .map_err(|err| Error::Config(format!("failed to build http client: {:?}", err)))?;

        Ok(Self {
            http: http.with(SurfLogging),
        })
    }

    async fn send(&self, path: &str) -> Result<Response> {
        Ok(self.http.get(path).await?)
    }

    async fn read_json<T: DeserializeOwned>(path: &str, mut res: Response) -> Result<T> {
        let status = res.status();
        if !status.is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "GET {} returned {}",
                path, status
            )));
        }
        Ok(res.body_json::<T>().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let res = self.send(path).await?;
        Self::read_json(path, res).await
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn posts(&self, limit: Option<usize>) -> Result<Vec<RawResource>> {
        let path = match limit {
            Some(limit) => format!("posts?_limit={}", limit),
            None => "posts".to_string(),
        };
        self.get_json(&path).await
    }

    async fn post(&self, id: u32) -> Result<RawResource> {
        let path = format!("posts/{}", id);
        let res = self.send(&path).await?;
        if res.status() == StatusCode::NotFound {
            return Err(Error::NotFound(id));
        }
        Self::read_json(&path, res).await
    }

    async fn photos(&self, limit: usize) -> Result<Vec<RawResource>> {
        self.get_json(&format!("photos?_limit={}", limit)).await
    }

    async fn users(&self) -> Result<Vec<User>> {
        self.get_json("users").await
    }
}
