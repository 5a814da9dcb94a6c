use super::*;

// =============================================================
// classify
// =============================================================

#[test]
fn non_get_requests_pass_through() {
    let mut req = FetchRequest::get("/api/rooms");
    req.method = "POST".into();
    assert_eq!(classify(&req), Strategy::Passthrough);
}

#[test]
fn navigations_are_network_first() {
    assert_eq!(classify(&FetchRequest::navigation("/settings")), Strategy::NetworkFirst);
}

#[test]
fn subresources_are_cache_first() {
    assert_eq!(classify(&FetchRequest::get("/static/css/themes.css")), Strategy::CacheFirst);
}

#[test]
fn non_get_navigation_still_passes_through() {
    let mut req = FetchRequest::navigation("/login");
    req.method = "POST".into();
    assert_eq!(classify(&req), Strategy::Passthrough);
}

// =============================================================
// is_static_asset
// =============================================================

#[test]
fn static_path_is_cacheable() {
    assert!(is_static_asset("https://hub.example/static/data/rooms.json"));
}

#[test]
fn known_extensions_are_cacheable() {
    assert!(is_static_asset("https://cdn.example/lib/bootstrap.min.css"));
    assert!(is_static_asset("/img/logo.PNG"));
    assert!(is_static_asset("/fonts/icons.woff2?v=3"));
}

#[test]
fn query_and_fragment_do_not_count() {
    assert!(!is_static_asset("/api/rooms?format=.css"));
    assert!(!is_static_asset("/page#section.js"));
}

#[test]
fn api_and_page_urls_are_not_cacheable() {
    assert!(!is_static_asset("https://hub.example/api/rooms"));
    assert!(!is_static_asset("https://hub.example/settings"));
    assert!(!is_static_asset("https://hub.example/"));
}

#[test]
fn dotted_directory_is_not_an_extension() {
    assert!(!is_static_asset("/v1.js/rooms"));
}

// =============================================================
// Synthetic responses
// =============================================================

#[test]
fn offline_fallback_is_non_empty_html() {
    let resp = SyntheticResponse::offline_page();
    assert!(resp.content_type.starts_with("text/html"));
    assert!(resp.body.contains("<html"));
    assert!(!resp.body.is_empty());
}

#[test]
fn image_placeholder_is_svg() {
    let resp = SyntheticResponse::image_placeholder();
    assert_eq!(resp.content_type, "image/svg+xml");
    assert!(resp.body.starts_with("<svg"));
}

#[test]
fn not_available_is_404() {
    let resp = SyntheticResponse::not_available();
    assert_eq!(resp.status, 404);
    assert_eq!(resp.status_text, "Not Found");
}
