pub mod error;
pub mod handlers;
pub mod routes;

use crate::domain::error::TranslatorError;
use crate::state::AppState;
use tokio::net::TcpListener;
use tracing::info;

pub use routes::create_router;

/// Serve the HTTP API until Ctrl-C.
///
/// A request whose client disconnects is dropped together with its
/// in-flight provider call.
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<(), TranslatorError> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!(
        providers = ?state.chain.provider_names(),
        "Server listening on http://{}",
        addr
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
