use std::sync::Arc;

use clap::Parser;

mod config;
mod handler;
mod http;
mod logger;
mod server;
mod site;
mod template;

use config::{Cli, Config};
use site::Site;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        logger::log_error(&format!("startup: {e}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load(cli)?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(serve(cfg))
}

async fn serve(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Both templates must parse before the listener binds; a broken
    // template means the process never starts serving.
    let site = Arc::new(Site::load(&cfg)?);

    let addr = cfg.socket_addr()?;
    let listener = server::bind_listener(addr)?;
    logger::log_server_start(&addr, &cfg);

    server::run(listener, site).await?;
    Ok(())
}
