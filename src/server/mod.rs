// Server module entry point
// Accept loop feeding per-connection tasks

pub mod connection;
pub mod listener;

pub use listener::bind_listener;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::logger;
use crate::site::Site;

/// Accept connections until the process exits.
///
/// A failed accept is logged and the loop continues; individual
/// connections are served concurrently and do not coordinate.
pub async fn run(listener: TcpListener, site: Arc<Site>) -> std::io::Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                connection::handle_connection(stream, peer_addr, Arc::clone(&site));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
