//! Seams between the cache policy and the browser's cache and network.
//!
//! ERROR HANDLING
//! ==============
//! Every operation reports failure as a [`CacheError`]; the lifecycle decides
//! whether a failure aborts the step or is logged and skipped.

use crate::error::CacheError;
use crate::policy::{FetchRequest, SyntheticResponse};

/// A response the worker can inspect and duplicate.
pub trait ResponseLike: Sized {
    fn status(&self) -> u16;

    /// A second handle with its own body, so one copy can be stored while the
    /// other is returned.
    fn try_clone(&self) -> Result<Self, CacheError>;
}

/// Named cache generations, each a map from URL to stored response.
#[allow(async_fn_in_trait)]
pub trait CacheStorage {
    type Response: ResponseLike;

    async fn cache_names(&self) -> Result<Vec<String>, CacheError>;

    /// Returns whether a cache by that name existed.
    async fn delete_cache(&self, name: &str) -> Result<bool, CacheError>;

    /// Fetch `url` and store the response in `cache`.
    async fn add(&self, cache: &str, url: &str) -> Result<(), CacheError>;

    /// Look `url` up across every cache generation.
    async fn lookup(&self, url: &str) -> Result<Option<Self::Response>, CacheError>;

    async fn store(&self, cache: &str, url: &str, response: Self::Response) -> Result<(), CacheError>;
}

/// The network as seen from the worker.
#[allow(async_fn_in_trait)]
pub trait Network {
    type Response: ResponseLike;

    /// Fails only when no response arrives at all; HTTP error statuses are
    /// still responses.
    async fn fetch(&self, request: &FetchRequest) -> Result<Self::Response, CacheError>;
}

/// What the worker answers an intercepted request with.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply<R> {
    Response(R),
    Synthetic(SyntheticResponse),
}
