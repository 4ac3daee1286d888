//! Content dispatch module
//!
//! Maps a request path to a document under the content root and renders
//! it through the page shell, or renders the error shell when resolution
//! fails. Every resolution failure is a 404; there is no 500 path.

use std::io;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::handler::RequestContext;
use crate::http;
use crate::logger;
use crate::site::Site;

/// Document served for the empty request path
const DEFAULT_DOCUMENT: &str = "index.html";

/// Resolve and serve one content request.
///
/// In order: traversal paths are dropped before any file-system access,
/// the empty path maps to [`DEFAULT_DOCUMENT`], the path resolves under
/// the content root, and only regular files are served. Directories and
/// special files match no route and are dropped like traversals.
pub async fn serve(ctx: &RequestContext<'_>, site: &Site) -> Response<Full<Bytes>> {
    let rel = ctx.path.trim_start_matches('/');

    if rel.contains("..") {
        logger::log_warning(&format!("Dropping traversal path: {}", ctx.path));
        return http::build_empty_response();
    }

    let rel = if rel.is_empty() { DEFAULT_DOCUMENT } else { rel };
    let abs = site.content_dir.join(rel);

    // Stat without following symlinks, so a link out of the content root
    // is not silently served.
    let meta = match fs::symlink_metadata(&abs).await {
        Ok(meta) => meta,
        Err(err) => {
            logger::log_error(&format!("stat {}: {err}", abs.display()));
            return error_page(site, &err, rel, ctx.is_head);
        }
    };

    if !meta.is_file() {
        return http::build_empty_response();
    }

    match fs::read(&abs).await {
        // The file's bytes land in the content slot unescaped; the page
        // template's formatter choice for that slot decides.
        Ok(bytes) => http::build_page_response(site.render_page("", "", &bytes), ctx.is_head),
        Err(err) => error_page(site, &err, &abs.display().to_string(), ctx.is_head),
    }
}

/// 404 carrying the rendered error page
fn error_page(
    site: &Site,
    err: &io::Error,
    rel_path: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    http::build_error_page_response(site.render_error(err, rel_path), is_head)
}
