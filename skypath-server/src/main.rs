use skypath_server::catalog::load_from_path;
use skypath_server::config::ServerConfig;
use skypath_server::planner::SearchConfig;
use skypath_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skypath_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Failed to read server configuration");

    // The catalog is immutable once loaded; a bad dataset is fatal.
    let catalog = load_from_path(&config.data_path).expect("Failed to load flight dataset");
    info!(
        path = %config.data_path.display(),
        airports = catalog.airport_count(),
        flights = catalog.flight_count(),
        "Flight catalog loaded"
    );

    let state = AppState::new(catalog, SearchConfig::default());
    let app = create_router(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .expect("Failed to bind listener");
    info!("SkyPath listening on http://{}", config.bind);
    info!("  GET /health");
    info!("  GET /search?origin=JFK&destination=LAX&date=2024-03-15");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
