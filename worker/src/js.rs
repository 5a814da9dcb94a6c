//! Service-worker bindings for the cache and network seams.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Cache, Headers, Request, RequestDestination, RequestMode, Response, ResponseInit, ServiceWorkerGlobalScope};

use crate::error::CacheError;
use crate::policy::{FetchRequest, SyntheticResponse};
use crate::store::{CacheStorage, Network, Reply, ResponseLike};

fn reason(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| err.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{err:?}"))
}

impl ResponseLike for Response {
    fn status(&self) -> u16 {
        Response::status(self)
    }

    fn try_clone(&self) -> Result<Self, CacheError> {
        Response::clone(self).map_err(|err| CacheError::Put { url: self.url(), reason: reason(&err) })
    }
}

/// The scope's `caches` object.
pub struct BrowserCaches {
    caches: web_sys::CacheStorage,
}

impl BrowserCaches {
    pub fn new(scope: &ServiceWorkerGlobalScope) -> Result<Self, CacheError> {
        let caches = scope.caches().map_err(|err| CacheError::Storage(reason(&err)))?;
        Ok(Self { caches })
    }

    async fn open(&self, name: &str) -> Result<Cache, CacheError> {
        let open_err = |err: JsValue| CacheError::Open { name: name.to_owned(), reason: reason(&err) };
        JsFuture::from(self.caches.open(name)).await.map_err(open_err)?.dyn_into::<Cache>().map_err(open_err)
    }
}

impl CacheStorage for BrowserCaches {
    type Response = Response;

    async fn cache_names(&self) -> Result<Vec<String>, CacheError> {
        let keys = JsFuture::from(self.caches.keys()).await.map_err(|err| CacheError::Storage(reason(&err)))?;
        Ok(js_sys::Array::from(&keys).iter().filter_map(|name| name.as_string()).collect())
    }

    async fn delete_cache(&self, name: &str) -> Result<bool, CacheError> {
        let existed = JsFuture::from(self.caches.delete(name))
            .await
            .map_err(|err| CacheError::Storage(format!("deleting {name}: {}", reason(&err))))?;
        Ok(existed.as_bool().unwrap_or(false))
    }

    async fn add(&self, cache: &str, url: &str) -> Result<(), CacheError> {
        let cache = self.open(cache).await?;
        JsFuture::from(cache.add_with_str(url))
            .await
            .map_err(|err| CacheError::Add { url: url.to_owned(), reason: reason(&err) })?;
        Ok(())
    }

    async fn lookup(&self, url: &str) -> Result<Option<Response>, CacheError> {
        let found = JsFuture::from(self.caches.match_with_str(url))
            .await
            .map_err(|err| CacheError::Storage(format!("matching {url}: {}", reason(&err))))?;
        if found.is_undefined() || found.is_null() {
            return Ok(None);
        }
        Ok(found.dyn_into::<Response>().ok())
    }

    async fn store(&self, cache: &str, url: &str, response: Response) -> Result<(), CacheError> {
        let cache = self.open(cache).await?;
        JsFuture::from(cache.put_with_str(url, &response))
            .await
            .map_err(|err| CacheError::Put { url: url.to_owned(), reason: reason(&err) })?;
        Ok(())
    }
}

/// Fetches the intercepted request itself, keeping its headers and credentials.
pub struct EventNetwork {
    scope: ServiceWorkerGlobalScope,
    request: Request,
}

impl EventNetwork {
    pub fn new(scope: ServiceWorkerGlobalScope, request: Request) -> Self {
        Self { scope, request }
    }
}

impl Network for EventNetwork {
    type Response = Response;

    async fn fetch(&self, request: &FetchRequest) -> Result<Response, CacheError> {
        let network_err = |err: JsValue| CacheError::Network { url: request.url.clone(), reason: reason(&err) };
        JsFuture::from(self.scope.fetch_with_request(&self.request))
            .await
            .map_err(network_err)?
            .dyn_into::<Response>()
            .map_err(network_err)
    }
}

/// The policy's view of a browser request.
pub fn describe(request: &Request) -> FetchRequest {
    FetchRequest {
        method: request.method(),
        url: request.url(),
        navigate: request.mode() == RequestMode::Navigate,
        image: request.destination() == RequestDestination::Image,
    }
}

fn synthesize(synthetic: &SyntheticResponse) -> Result<Response, JsValue> {
    let headers = Headers::new()?;
    headers.set("Content-Type", synthetic.content_type)?;
    let init = ResponseInit::new();
    init.set_status(synthetic.status);
    init.set_status_text(synthetic.status_text);
    init.set_headers(&headers);
    Response::new_with_opt_str_and_init(Some(synthetic.body), &init)
}

/// Turn a policy reply into the value handed to `respondWith`.
pub fn into_response(reply: Reply<Response>) -> Result<Response, JsValue> {
    match reply {
        Reply::Response(response) => Ok(response),
        Reply::Synthetic(synthetic) => synthesize(&synthetic),
    }
}
