use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::cgi::{ProcessSpawner, Reaper};
use crate::config::{Config, ServerConfig};
use crate::http::connection::Connection;
use crate::server::ServerContext;

/// Pause after a failed `accept` so persistent errors (EMFILE) don't spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn bind(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let addr = cfg.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Listening on {}", addr);
    Ok(listener)
}

/// Accepts connections one at a time, forever.
///
/// Each transaction is awaited and its connection dropped before the next
/// `accept`. Failures are logged and never end the loop.
pub async fn serve(listener: TcpListener, ctx: ServerContext) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Accept failed: {}", e);
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from ({}, {})", peer.ip(), peer.port());

        let mut conn = Connection::new(socket, peer, ctx.clone());
        if let Err(e) = conn.run().await {
            error!("Connection error from {}: {:#}", peer, e);
        }
        drop(conn);
    }
}

/// Binds, starts the child reaper and serves until the process exits.
pub async fn run(cfg: Config) -> anyhow::Result<()> {
    let listener = bind(&cfg.server).await?;
    let spawner = ProcessSpawner::new(Reaper::start());
    serve(listener, ServerContext::new(cfg, Arc::new(spawner))).await
}
