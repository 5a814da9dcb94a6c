//! Cache manager errors.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error("opening cache {name} failed: {reason}")]
    Open { name: String, reason: String },
    #[error("caching {url} failed: {reason}")]
    Add { url: String, reason: String },
    #[error("storing {url} failed: {reason}")]
    Put { url: String, reason: String },
    #[error("cache storage error: {0}")]
    Storage(String),
    #[error("network request for {url} failed: {reason}")]
    Network { url: String, reason: String },
}
