//! HTTP response building module
//!
//! Builders for every response shape the server produces, decoupled from
//! the rendering and dispatch logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build a 200 response carrying a rendered HTML page.
pub fn build_page_response(page: Vec<u8>, is_head: bool) -> Response<Full<Bytes>> {
    build_html_response(200, page, is_head)
}

/// Build a 404 response carrying a rendered error page.
pub fn build_error_page_response(page: Vec<u8>, is_head: bool) -> Response<Full<Bytes>> {
    build_html_response(404, page, is_head)
}

fn build_html_response(status: u16, page: Vec<u8>, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = page.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(page) };

    Response::builder()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("page", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the response for a dropped request: empty body, default status.
///
/// Used for path-traversal attempts and file kinds no route matches.
pub fn build_empty_response() -> Response<Full<Bytes>> {
    Response::new(Full::new(Bytes::new()))
}

/// Build 404 Not Found response for a missing static asset
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 200 response for a static asset, with cache validators.
pub fn build_asset_response(
    data: Vec<u8>,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(data) };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("asset", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(kind: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {kind} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response_sets_html_headers() {
        let resp = build_page_response(b"<html></html>".to_vec(), false);
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()["Content-Type"],
            "text/html; charset=utf-8"
        );
        assert_eq!(resp.headers()["Content-Length"], "13");
    }

    #[test]
    fn test_head_keeps_content_length() {
        let resp = build_error_page_response(b"<html>gone</html>".to_vec(), true);
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["Content-Length"], "17");
    }

    #[test]
    fn test_empty_response_is_default_status() {
        let resp = build_empty_response();
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().get("Content-Type").is_none());
    }

    #[test]
    fn test_405_lists_allowed_methods() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD");
    }
}
