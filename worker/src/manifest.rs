//! The precache manifest for the current release.
//!
//! Bump `CACHE_NAME` whenever the list or any listed asset changes; the old
//! generation is deleted on the next activation.

#[cfg(test)]
#[path = "manifest_test.rs"]
mod manifest_test;

pub const CACHE_NAME: &str = "hubsync-cache-v1";
pub const OFFLINE_PAGE: &str = "/offline";

pub const PRECACHE_URLS: &[&str] = &[
    "/",
    "/static/site.webmanifest",
    "/static/css/themes.css",
    "/static/images/apple-touch-icon.png",
    "/static/images/favicon-96x96.png",
    "/static/images/favicon.ico",
    "/static/images/favicon.svg",
    "/static/images/hubsync_logo.png",
    "/static/images/web-app-manifest-192x192.png",
    "/static/images/web-app-manifest-512x512.png",
    "/static/pkg/hubsync_web.js",
    "/static/pkg/hubsync_web_bg.wasm",
    OFFLINE_PAGE,
];

/// One cache generation's name and contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheManifest {
    pub cache_name: String,
    pub offline_page: String,
    pub urls: Vec<String>,
}

impl Default for CacheManifest {
    fn default() -> Self {
        Self::new(CACHE_NAME, OFFLINE_PAGE, PRECACHE_URLS)
    }
}

impl CacheManifest {
    pub fn new(cache_name: &str, offline_page: &str, urls: &[&str]) -> Self {
        Self {
            cache_name: cache_name.to_owned(),
            offline_page: offline_page.to_owned(),
            urls: urls.iter().map(|u| (*u).to_owned()).collect(),
        }
    }

    /// Manifest URLs other than the offline page, in order, without duplicates.
    #[must_use]
    pub fn secondary_urls(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for url in &self.urls {
            if url != &self.offline_page && !seen.contains(&url.as_str()) {
                seen.push(url);
            }
        }
        seen
    }
}
