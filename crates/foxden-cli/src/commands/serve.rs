//! `foxden serve` — run the REST API server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use foxden_core::FoxdenConfig;

/// Open the ledger once and serve the API until Ctrl-C.
pub async fn serve(config: FoxdenConfig, port: u16) -> anyhow::Result<()> {
    let ledger = Arc::new(super::open_ledger(config)?);

    let router = foxden_api::build_router(ledger);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "API server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    info!("server stopped");
    Ok(())
}
