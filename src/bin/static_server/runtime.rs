use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use http_conformance::logging;
use http_conformance::model::ExpectationTable;

use super::routes::{ServerState, build_router};

#[derive(Parser)]
#[command(name = "static-server")]
#[command(about = "Static file server that satisfies the http-conformance table", long_about = None)]
pub(super) struct Args {
    /// Directory to serve files from
    #[arg(default_value = "www")]
    pub(super) root: PathBuf,

    /// Port to listen on
    #[arg(long = "serverPort", default_value_t = 8888)]
    pub(super) server_port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub(super) bind: IpAddr,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub(super) log_level: String,
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    let state = Arc::new(ServerState {
        root: args.root.clone(),
        redirects: ExpectationTable::default().redirects().to_vec(),
    });
    let app = build_router(state);

    let addr = SocketAddr::new(args.bind, args.server_port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(%local_addr, root = %args.root.display(), "static-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
