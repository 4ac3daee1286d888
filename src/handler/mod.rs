//! Request handling module
//!
//! Entry point for HTTP request processing: method validation, fixed
//! static routes, and dispatch into the content pipeline.

pub mod content;
pub mod static_files;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, Version};

use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::site::Site;

/// Request context shared by the content and static-file handlers
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling.
///
/// Never fails: every error becomes a response, so hyper sees
/// `Infallible`.
pub async fn handle_request<B>(
    req: Request<B>,
    site: Arc<Site>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    let response = if matches!(method, Method::GET | Method::HEAD) {
        let ctx = RequestContext {
            path: &path,
            is_head,
            if_none_match: header_string(&req, "if-none-match"),
        };
        route_request(&ctx, &site).await
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        http::build_405_response()
    };

    if site.access_log {
        let mut entry =
            AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(
            response.body().size_hint().exact().unwrap_or(0),
        )
        .unwrap_or(usize::MAX);
        entry.referer = header_string(&req, "referer");
        entry.user_agent = header_string(&req, "user-agent");
        logger::log_access(&entry, &site.access_log_format);
    }

    Ok(response)
}

/// Dispatch by path: the two fixed static routes bypass the content
/// pipeline entirely.
async fn route_request(ctx: &RequestContext<'_>, site: &Site) -> Response<Full<Bytes>> {
    if ctx.path == "/favicon.ico" {
        return static_files::serve_favicon(ctx, site).await;
    }
    if let Some(rel) = ctx.path.strip_prefix("/static/") {
        return static_files::serve_asset(ctx, site, rel).await;
    }
    content::serve(ctx, site).await
}

/// Read one header as an owned string, if present and valid
fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}
