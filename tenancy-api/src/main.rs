use std::sync::Arc;
use tenancy_api::{init_tracing, router, AppState, ServiceConfig};
use tenancy_org::MemoryOrganizationStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;
    init_tracing(config.log_json);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        backend_mode = %config.backend_mode,
        key_bits = config.key_bits,
        "tenancy-api listening"
    );

    let state = AppState::new(config, Arc::new(MemoryOrganizationStore::new()))?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("tenancy-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
