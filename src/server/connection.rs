// Connection handling module
// Serves a single accepted TCP connection

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::handler;
use crate::logger;
use crate::site::Site;

/// Serve one connection in a spawned task.
///
/// Requests on the connection share the immutable `Site`; a handler
/// failure never takes the connection task down, and a connection error
/// never takes the server down.
pub fn handle_connection(stream: tokio::net::TcpStream, peer_addr: SocketAddr, site: Arc<Site>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            let site = Arc::clone(&site);
            handler::handle_request(req, site, peer_addr)
        });

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service);

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
