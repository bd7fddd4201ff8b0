use upload_service::{
    adapters::{router::create_router, state::AppState},
    domain::config::server::ServerConfig,
    services,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("ERROR: Invalid server configuration");

    let storage_service = services::create_storage_service(&config)
        .expect("ERROR: Failed to resolve upload directory");

    tracing::info!(
        "Starting upload-service with upload dir: {} (max upload {} bytes)",
        config.upload_dir.display(),
        config.max_upload_size
    );

    let router = create_router(AppState::new(storage_service), &config);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
