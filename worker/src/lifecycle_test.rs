use super::*;

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};

use futures::executor::block_on;

// =============================================================
// Fakes
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq)]
struct FakeResponse {
    status: u16,
    body: String,
}

impl FakeResponse {
    fn ok(body: &str) -> Self {
        Self { status: 200, body: body.to_owned() }
    }
}

impl ResponseLike for FakeResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn try_clone(&self) -> Result<Self, CacheError> {
        Ok(self.clone())
    }
}

/// Cache generations backed by maps. `add` pulls from `origin`.
#[derive(Default)]
struct MemoryCaches {
    caches: RefCell<BTreeMap<String, BTreeMap<String, FakeResponse>>>,
    origin: HashMap<String, FakeResponse>,
    failing_deletes: HashSet<String>,
    broken: bool,
}

impl MemoryCaches {
    fn with_origin(urls: &[&str]) -> Self {
        Self {
            origin: urls.iter().map(|u| ((*u).to_owned(), FakeResponse::ok(u))).collect(),
            ..Self::default()
        }
    }

    fn with_generations(names: &[&str]) -> Self {
        let caches = Self::default();
        for name in names {
            caches.caches.borrow_mut().insert((*name).to_owned(), BTreeMap::new());
        }
        caches
    }

    fn seed(&self, cache: &str, url: &str, response: FakeResponse) {
        self.caches.borrow_mut().entry(cache.to_owned()).or_default().insert(url.to_owned(), response);
    }

    fn stored(&self, cache: &str) -> Vec<String> {
        self.caches.borrow().get(cache).map(|c| c.keys().cloned().collect()).unwrap_or_default()
    }

    fn names(&self) -> Vec<String> {
        self.caches.borrow().keys().cloned().collect()
    }
}

impl CacheStorage for MemoryCaches {
    type Response = FakeResponse;

    async fn cache_names(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.names())
    }

    async fn delete_cache(&self, name: &str) -> Result<bool, CacheError> {
        if self.failing_deletes.contains(name) {
            return Err(CacheError::Storage(format!("delete {name}")));
        }
        Ok(self.caches.borrow_mut().remove(name).is_some())
    }

    async fn add(&self, cache: &str, url: &str) -> Result<(), CacheError> {
        let Some(response) = self.origin.get(url) else {
            return Err(CacheError::Add { url: url.to_owned(), reason: "404".into() });
        };
        self.seed(cache, url, response.clone());
        Ok(())
    }

    async fn lookup(&self, url: &str) -> Result<Option<FakeResponse>, CacheError> {
        if self.broken {
            return Err(CacheError::Storage("match".into()));
        }
        Ok(self.caches.borrow().values().find_map(|cache| cache.get(url).cloned()))
    }

    async fn store(&self, cache: &str, url: &str, response: FakeResponse) -> Result<(), CacheError> {
        if self.broken {
            return Err(CacheError::Put { url: url.to_owned(), reason: "quota".into() });
        }
        self.seed(cache, url, response);
        Ok(())
    }
}

/// A network that serves `routes` or fails everything while offline.
#[derive(Default)]
struct FakeNetwork {
    routes: HashMap<String, FakeResponse>,
    offline: bool,
    calls: Cell<usize>,
}

impl FakeNetwork {
    fn serving(routes: &[(&str, FakeResponse)]) -> Self {
        Self {
            routes: routes.iter().map(|(u, r)| ((*u).to_owned(), r.clone())).collect(),
            ..Self::default()
        }
    }

    fn offline() -> Self {
        Self { offline: true, ..Self::default() }
    }
}

impl Network for FakeNetwork {
    type Response = FakeResponse;

    async fn fetch(&self, request: &FetchRequest) -> Result<FakeResponse, CacheError> {
        self.calls.set(self.calls.get() + 1);
        if self.offline {
            return Err(CacheError::Network { url: request.url.clone(), reason: "offline".into() });
        }
        Ok(self
            .routes
            .get(&request.url)
            .cloned()
            .unwrap_or(FakeResponse { status: 404, body: String::new() }))
    }
}

fn manifest() -> CacheManifest {
    CacheManifest::new("v3", "/offline", &["/", "/static/app.css", "/static/logo.png", "/offline"])
}

// =============================================================
// install
// =============================================================

#[test]
fn install_caches_every_manifest_url() {
    let caches = MemoryCaches::with_origin(&["/", "/static/app.css", "/static/logo.png", "/offline"]);
    let report = block_on(install(&caches, &manifest())).unwrap();
    assert_eq!(report.cached, vec!["/offline", "/", "/static/app.css", "/static/logo.png"]);
    assert!(report.skipped.is_empty());
    assert_eq!(caches.stored("v3").len(), 4);
}

#[test]
fn install_skips_failing_secondary_urls() {
    let caches = MemoryCaches::with_origin(&["/", "/offline"]);
    let report = block_on(install(&caches, &manifest())).unwrap();
    assert_eq!(report.cached, vec!["/offline", "/"]);
    assert_eq!(report.skipped, vec!["/static/app.css", "/static/logo.png"]);
}

#[test]
fn install_fails_when_offline_page_fails() {
    let caches = MemoryCaches::with_origin(&["/", "/static/app.css"]);
    let err = block_on(install(&caches, &manifest())).unwrap_err();
    assert!(matches!(err, CacheError::Add { ref url, .. } if url == "/offline"));
}

// =============================================================
// activate
// =============================================================

#[test]
fn activate_deletes_all_other_generations() {
    let caches = MemoryCaches::with_generations(&["v1", "v2", "v3"]);
    let deleted = block_on(activate(&caches, "v3")).unwrap();
    assert_eq!(deleted, vec!["v1", "v2"]);
    assert_eq!(caches.names(), vec!["v3"]);
}

#[test]
fn activate_with_only_current_deletes_nothing() {
    let caches = MemoryCaches::with_generations(&["v3"]);
    assert!(block_on(activate(&caches, "v3")).unwrap().is_empty());
}

#[test]
fn activate_continues_past_failed_delete() {
    let mut caches = MemoryCaches::with_generations(&["v1", "v2", "v3"]);
    caches.failing_deletes.insert("v1".into());
    let deleted = block_on(activate(&caches, "v3")).unwrap();
    assert_eq!(deleted, vec!["v2"]);
}

// =============================================================
// respond: navigation
// =============================================================

#[test]
fn non_get_is_not_intercepted() {
    let caches = MemoryCaches::default();
    let network = FakeNetwork::default();
    let mut req = FetchRequest::get("/api/rooms");
    req.method = "DELETE".into();
    assert!(block_on(respond(&caches, &network, &manifest(), &req)).is_none());
    assert_eq!(network.calls.get(), 0);
}

#[test]
fn navigation_prefers_network() {
    let caches = MemoryCaches::default();
    caches.seed("v3", "/settings", FakeResponse::ok("stale"));
    let network = FakeNetwork::serving(&[("/settings", FakeResponse::ok("fresh"))]);
    let reply = block_on(respond(&caches, &network, &manifest(), &FetchRequest::navigation("/settings")));
    assert_eq!(reply, Some(Reply::Response(FakeResponse::ok("fresh"))));
}

#[test]
fn navigation_http_error_is_still_returned() {
    let caches = MemoryCaches::default();
    let network = FakeNetwork::serving(&[]);
    let reply = block_on(respond(&caches, &network, &manifest(), &FetchRequest::navigation("/gone")));
    assert!(matches!(reply, Some(Reply::Response(FakeResponse { status: 404, .. }))));
}

#[test]
fn offline_navigation_serves_cached_offline_page() {
    let caches = MemoryCaches::default();
    caches.seed("v3", "/offline", FakeResponse::ok("offline page"));
    let reply = block_on(respond(&caches, &FakeNetwork::offline(), &manifest(), &FetchRequest::navigation("/rooms")));
    assert_eq!(reply, Some(Reply::Response(FakeResponse::ok("offline page"))));
}

#[test]
fn offline_navigation_with_empty_cache_serves_inline_html() {
    let caches = MemoryCaches::default();
    let reply = block_on(respond(&caches, &FakeNetwork::offline(), &manifest(), &FetchRequest::navigation("/rooms")));
    let Some(Reply::Synthetic(page)) = reply else {
        panic!("expected synthetic reply, got {reply:?}");
    };
    assert_eq!(page.status, 503);
    assert!(!page.body.is_empty());
}

#[test]
fn offline_navigation_with_broken_cache_serves_inline_html() {
    let caches = MemoryCaches { broken: true, ..MemoryCaches::default() };
    let reply = block_on(respond(&caches, &FakeNetwork::offline(), &manifest(), &FetchRequest::navigation("/")));
    assert_eq!(reply, Some(Reply::Synthetic(SyntheticResponse::offline_page())));
}

// =============================================================
// respond: subresources
// =============================================================

#[test]
fn cache_hit_skips_network() {
    let caches = MemoryCaches::default();
    caches.seed("v1", "/static/app.css", FakeResponse::ok("cached css"));
    let network = FakeNetwork::serving(&[("/static/app.css", FakeResponse::ok("fresh css"))]);
    let reply = block_on(respond(&caches, &network, &manifest(), &FetchRequest::get("/static/app.css")));
    assert_eq!(reply, Some(Reply::Response(FakeResponse::ok("cached css"))));
    assert_eq!(network.calls.get(), 0);
}

#[test]
fn miss_stores_static_asset_in_current_cache() {
    let caches = MemoryCaches::default();
    let network = FakeNetwork::serving(&[("/img/avatar.webp", FakeResponse::ok("pixels"))]);
    let reply = block_on(respond(&caches, &network, &manifest(), &FetchRequest::get("/img/avatar.webp")));
    assert_eq!(reply, Some(Reply::Response(FakeResponse::ok("pixels"))));
    assert_eq!(caches.stored("v3"), vec!["/img/avatar.webp"]);
}

#[test]
fn miss_does_not_store_non_static_response() {
    let caches = MemoryCaches::default();
    let network = FakeNetwork::serving(&[("/api/rooms", FakeResponse::ok("[]"))]);
    block_on(respond(&caches, &network, &manifest(), &FetchRequest::get("/api/rooms")));
    assert!(caches.stored("v3").is_empty());
}

#[test]
fn miss_does_not_store_non_200_response() {
    let caches = MemoryCaches::default();
    let network = FakeNetwork::serving(&[("/static/moved.css", FakeResponse { status: 301, body: String::new() })]);
    let reply = block_on(respond(&caches, &network, &manifest(), &FetchRequest::get("/static/moved.css")));
    assert!(matches!(reply, Some(Reply::Response(FakeResponse { status: 301, .. }))));
    assert!(caches.stored("v3").is_empty());
}

#[test]
fn store_failure_still_returns_response() {
    let caches = MemoryCaches { broken: true, ..MemoryCaches::default() };
    let network = FakeNetwork::serving(&[("/static/app.js", FakeResponse::ok("js"))]);
    let reply = block_on(respond(&caches, &network, &manifest(), &FetchRequest::get("/static/app.js")));
    assert_eq!(reply, Some(Reply::Response(FakeResponse::ok("js"))));
}

#[test]
fn offline_image_miss_gets_placeholder() {
    let caches = MemoryCaches::default();
    let req = FetchRequest::get("/uploads/photo.jpg").as_image();
    let reply = block_on(respond(&caches, &FakeNetwork::offline(), &manifest(), &req));
    assert_eq!(reply, Some(Reply::Synthetic(SyntheticResponse::image_placeholder())));
}

#[test]
fn offline_other_miss_gets_not_found() {
    let caches = MemoryCaches::default();
    let reply = block_on(respond(&caches, &FakeNetwork::offline(), &manifest(), &FetchRequest::get("/api/rooms")));
    assert_eq!(reply, Some(Reply::Synthetic(SyntheticResponse::not_available())));
}
