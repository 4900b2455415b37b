use crate::deduplication::DeduplicationError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by catalog queries and the user list store.
///
/// `Clone` because a single upstream failure is handed to every caller that
/// was waiting on the same de-duplicated request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Movie {0} not found")]
    NotFound(u32),

    #[error(transparent)]
    Deduplication(#[from] DeduplicationError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ErrorKind {
    UpstreamUnavailable,
    NotFound,
    Deduplication,
    Storage,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Deduplication(_) => ErrorKind::Deduplication,
            Error::Storage(_) => ErrorKind::Storage,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

// surf::Error does not implement std::error::Error, so it cannot be a source.
impl From<surf::Error> for Error {
    fn from(err: surf::Error) -> Self {
        Error::UpstreamUnavailable(format!("{} ({})", err, err.status()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(err.to_string())
    }
}
