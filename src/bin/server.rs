//! CRUD server: loads config from env (and `.env`), ensures the schema, registers the
//! Client/Worker/Project services and serves them until Ctrl-C.

use crud_backend::{app_router, ensure_schema, load_from_env, AppState, ConnectionManager, ServiceRegistry};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crud_backend=info,tower_http=info")),
        )
        .init();

    let config = load_from_env()?;
    let pool = ConnectionManager::get_instance(&config.database).await?;
    ensure_schema(&pool).await?;

    let services = ServiceRegistry::with_default_services(pool.clone())?;
    tracing::info!(contexts = ?services.context_paths(), "services registered");
    let state = AppState::new(pool, services);
    let app = app_router(state, config.body_limit);

    let listener = TcpListener::bind(config.bind_addr()?).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
