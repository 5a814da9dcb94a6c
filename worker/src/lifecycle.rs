//! Install, activate, and fetch handling for the offline cache.
//!
//! LIFECYCLE
//! =========
//! `install` fills the current generation from the manifest. The offline page
//! is mandatory; every other URL is best effort. `activate` drops every other
//! generation. `respond` serves intercepted requests according to
//! [`classify`].

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use crate::error::CacheError;
use crate::manifest::CacheManifest;
use crate::policy::{FetchRequest, Strategy, SyntheticResponse, classify, is_static_asset};
use crate::store::{CacheStorage, Network, Reply, ResponseLike};

/// URLs precached during install.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub cached: Vec<String>,
    pub skipped: Vec<String>,
}

/// Precache the manifest into its cache generation.
///
/// # Errors
///
/// Returns the error from caching the offline page. Failures for other URLs
/// are logged and listed in [`InstallReport::skipped`].
pub async fn install<S: CacheStorage>(storage: &S, manifest: &CacheManifest) -> Result<InstallReport, CacheError> {
    storage.add(&manifest.cache_name, &manifest.offline_page).await?;

    let mut report = InstallReport { cached: vec![manifest.offline_page.clone()], skipped: Vec::new() };
    for url in manifest.secondary_urls() {
        match storage.add(&manifest.cache_name, url).await {
            Ok(()) => report.cached.push(url.to_owned()),
            Err(err) => {
                log::warn!("sw: precache skipped: {err}");
                report.skipped.push(url.to_owned());
            }
        }
    }
    log::info!(
        "sw: installed {} ({} cached, {} skipped)",
        manifest.cache_name,
        report.cached.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Delete every cache generation other than `current`.
///
/// # Errors
///
/// Returns an error when the generation names cannot be listed. A failed
/// delete is logged and the remaining generations are still attempted.
pub async fn activate<S: CacheStorage>(storage: &S, current: &str) -> Result<Vec<String>, CacheError> {
    let mut deleted = Vec::new();
    for name in storage.cache_names().await? {
        if name == current {
            continue;
        }
        match storage.delete_cache(&name).await {
            Ok(true) => {
                log::info!("sw: deleted old cache {name}");
                deleted.push(name);
            }
            Ok(false) => {}
            Err(err) => log::warn!("sw: {err}"),
        }
    }
    Ok(deleted)
}

/// Answer an intercepted request, or `None` to let the browser handle it.
pub async fn respond<S, N>(
    storage: &S,
    network: &N,
    manifest: &CacheManifest,
    request: &FetchRequest,
) -> Option<Reply<S::Response>>
where
    S: CacheStorage,
    N: Network<Response = S::Response>,
{
    match classify(request) {
        Strategy::Passthrough => None,
        Strategy::NetworkFirst => Some(network_first(storage, network, manifest, request).await),
        Strategy::CacheFirst => Some(cache_first(storage, network, manifest, request).await),
    }
}

async fn network_first<S, N>(storage: &S, network: &N, manifest: &CacheManifest, request: &FetchRequest) -> Reply<S::Response>
where
    S: CacheStorage,
    N: Network<Response = S::Response>,
{
    let err = match network.fetch(request).await {
        Ok(response) => return Reply::Response(response),
        Err(err) => err,
    };
    log::debug!("sw: {err}; serving offline page");
    match storage.lookup(&manifest.offline_page).await {
        Ok(Some(page)) => Reply::Response(page),
        Ok(None) => Reply::Synthetic(SyntheticResponse::offline_page()),
        Err(lookup_err) => {
            log::warn!("sw: {lookup_err}");
            Reply::Synthetic(SyntheticResponse::offline_page())
        }
    }
}

async fn cache_first<S, N>(storage: &S, network: &N, manifest: &CacheManifest, request: &FetchRequest) -> Reply<S::Response>
where
    S: CacheStorage,
    N: Network<Response = S::Response>,
{
    match storage.lookup(&request.url).await {
        Ok(Some(hit)) => return Reply::Response(hit),
        Ok(None) => {}
        Err(err) => log::warn!("sw: {err}"),
    }

    match network.fetch(request).await {
        Ok(response) => {
            if response.status() == 200 && is_static_asset(&request.url) {
                let stored = match response.try_clone() {
                    Ok(copy) => storage.store(&manifest.cache_name, &request.url, copy).await,
                    Err(err) => Err(err),
                };
                if let Err(err) = stored {
                    log::warn!("sw: {err}");
                }
            }
            Reply::Response(response)
        }
        Err(err) => {
            log::debug!("sw: {err}");
            if request.image {
                Reply::Synthetic(SyntheticResponse::image_placeholder())
            } else {
                Reply::Synthetic(SyntheticResponse::not_available())
            }
        }
    }
}
