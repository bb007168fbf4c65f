mod routes;
mod state;

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use routes::router;
pub use state::DashboardState;

/// Serves the dashboard until Ctrl-C is received.
pub async fn serve(bind: &str, state: Arc<DashboardState>) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!("Connection to dashboard is established on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(error) = tokio::signal::ctrl_c().await {
                warn!("Could not listen for shutdown signal: {error}");
            }
        })
        .await?;

    info!("Dashboard stopped");

    Ok(())
}
