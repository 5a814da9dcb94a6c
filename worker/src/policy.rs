//! Request classification and synthetic fallback responses.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

/// The parts of an intercepted request the policy looks at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: String,
    pub url: String,
    /// The request is a top-level page navigation.
    pub navigate: bool,
    /// The request destination is an image.
    pub image: bool,
}

impl FetchRequest {
    /// A plain `GET` for a subresource.
    pub fn get(url: &str) -> Self {
        Self { method: "GET".into(), url: url.to_owned(), navigate: false, image: false }
    }

    /// A `GET` page navigation.
    pub fn navigation(url: &str) -> Self {
        Self { navigate: true, ..Self::get(url) }
    }

    #[must_use]
    pub fn as_image(mut self) -> Self {
        self.image = true;
        self
    }
}

/// How a request is served.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Not intercepted; the browser handles it.
    Passthrough,
    /// Network, then cached offline page, then inline fallback.
    NetworkFirst,
    /// Cache, then network (storing static assets), then placeholder.
    CacheFirst,
}

#[must_use]
pub fn classify(request: &FetchRequest) -> Strategy {
    if !request.method.eq_ignore_ascii_case("GET") {
        Strategy::Passthrough
    } else if request.navigate {
        Strategy::NetworkFirst
    } else {
        Strategy::CacheFirst
    }
}

const STATIC_EXTENSIONS: &[&str] = &["css", "js", "png", "jpg", "jpeg", "svg", "ico", "webp", "woff2", "webmanifest", "wasm"];

/// Whether a fetched response for `url` belongs in the cache.
#[must_use]
pub fn is_static_asset(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    if path.contains("/static/") {
        return true;
    }
    let file = path.rsplit('/').next().unwrap_or_default();
    file.rsplit_once('.')
        .is_some_and(|(_, ext)| STATIC_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// A response built by the worker itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntheticResponse {
    pub status: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: &'static str,
}

pub const OFFLINE_FALLBACK_HTML: &str = concat!(
    "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">",
    "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
    "<title>Offline - HubSync</title></head><body>",
    "<main style=\"font-family:sans-serif;text-align:center;padding:3rem 1rem\">",
    "<h1>You are offline</h1>",
    "<p>HubSync could not reach the server. Check your connection and try again.</p>",
    "</main></body></html>"
);

pub const IMAGE_PLACEHOLDER_SVG: &str = concat!(
    "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"200\" height=\"200\" viewBox=\"0 0 200 200\">",
    "<rect width=\"200\" height=\"200\" fill=\"#ddd\"/>",
    "<text x=\"50%\" y=\"50%\" text-anchor=\"middle\" dy=\".3em\" fill=\"#999\">No image</text></svg>"
);

impl SyntheticResponse {
    /// Served for a navigation when neither network nor cached offline page is available.
    #[must_use]
    pub fn offline_page() -> Self {
        Self {
            status: 503,
            status_text: "Service Unavailable",
            content_type: "text/html; charset=utf-8",
            body: OFFLINE_FALLBACK_HTML,
        }
    }

    #[must_use]
    pub fn image_placeholder() -> Self {
        Self { status: 200, status_text: "OK", content_type: "image/svg+xml", body: IMAGE_PLACEHOLDER_SVG }
    }

    #[must_use]
    pub fn not_available() -> Self {
        Self {
            status: 404,
            status_text: "Not Found",
            content_type: "text/plain; charset=utf-8",
            body: "Resource not available offline",
        }
    }
}
