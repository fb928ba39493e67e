//! Resource API server.
//!
//! Run from repo root: `cargo run -p resource-server`
//! Settings come from the environment or a `.env` file (see `ServerConfig`).

use resource_api::{app, open_store, AppState, ServerConfig, DOCS_PATH, OPENAPI_PATH};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("resource_api=info,resource_server=info")
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;
    // The listener only starts once the store is reachable.
    let store = match open_store(&config.store).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to resource store");
            return Err(e.into());
        }
    };

    let router = app(AppState::new(store), config.body_limit);
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("listening on http://{}", addr);
    tracing::info!("Swagger UI at http://{}{}/", addr, DOCS_PATH);
    tracing::info!("OpenAPI document at http://{}{}", addr, OPENAPI_PATH);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
