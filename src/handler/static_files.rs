//! Static asset serving module
//!
//! Serves files under the static root byte-for-byte, with MIME detection
//! and `ETag` validation. Nothing here goes through the template pipeline.

use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::handler::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use crate::site::Site;

/// Serve `<static>/favicon.ico` for the fixed `/favicon.ico` route
pub async fn serve_favicon(ctx: &RequestContext<'_>, site: &Site) -> Response<Full<Bytes>> {
    serve_asset(ctx, site, "favicon.ico").await
}

/// Serve one asset addressed relative to the static root
pub async fn serve_asset(
    ctx: &RequestContext<'_>,
    site: &Site,
    rel: &str,
) -> Response<Full<Bytes>> {
    match load_asset(&site.static_dir, rel).await {
        Some((data, content_type)) => {
            let etag = cache::generate_etag(&data);
            if cache::etag_matches(ctx.if_none_match.as_deref(), &etag) {
                return http::build_304_response(&etag);
            }
            http::build_asset_response(data, content_type, &etag, ctx.is_head)
        }
        None => http::build_404_response(),
    }
}

/// Load an asset's bytes and Content-Type.
///
/// The resolved path must stay within the static root after
/// canonicalization; anything escaping it is treated as not found.
async fn load_asset(static_dir: &Path, rel: &str) -> Option<(Vec<u8>, &'static str)> {
    let path = static_dir.join(rel.trim_start_matches('/'));

    let static_root = match static_dir.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{}': {e}",
                static_dir.display()
            ));
            return None;
        }
    };

    // Missing assets are a plain 404, not worth a log line
    let canonical = path.canonicalize().ok()?;
    if !canonical.starts_with(&static_root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {rel} -> {}",
            canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read asset '{}': {e}",
                canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::content_type_for(canonical.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use std::path::PathBuf;

    fn temp_static(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("siteserve-static-{tag}-{}", std::process::id()));
        let _ = std_fs::remove_dir_all(&dir);
        std_fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_asset_with_content_type() {
        let dir = temp_static("load");
        std_fs::write(dir.join("style.css"), "body{}").unwrap();

        let (data, content_type) = load_asset(&dir, "style.css").await.unwrap();
        assert_eq!(data, b"body{}");
        assert_eq!(content_type, "text/css");

        let _ = std_fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_asset_is_none() {
        let dir = temp_static("missing");
        assert!(load_asset(&dir, "nope.css").await.is_none());
        let _ = std_fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_escaping_static_root_is_blocked() {
        let dir = temp_static("escape");
        let name = format!("siteserve-static-outside-{}.txt", std::process::id());
        let outside = dir.parent().unwrap().join(&name);
        std_fs::write(&outside, "secret").unwrap();

        assert!(load_asset(&dir, &format!("../{name}")).await.is_none());

        let _ = std_fs::remove_file(&outside);
        let _ = std_fs::remove_dir_all(&dir);
    }
}
