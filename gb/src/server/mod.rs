//! HTTP server for goal breakdown (axum).
//!
//! **Public API**: [`run_server`], [`serve_on_listener`], [`router`].

mod app;
mod response;

use eyre::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

pub use app::{AppState, router};

/// Serve on an already-bound listener until the task is dropped
///
/// Tests bind `127.0.0.1:0` and pass the listener in.
pub async fn serve_on_listener(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr().context("Failed to read listener address")?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, router(state))
        .await
        .context("Server terminated with error")
}

/// Bind `addr` and serve until Ctrl-C
pub async fn run_server(addr: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    let local = listener.local_addr().context("Failed to read listener address")?;
    info!("HTTP server listening on http://{}", local);
    println!("goalbreak listening on http://{}", local);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated with error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
}
