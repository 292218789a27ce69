//! pets-api service entry point

use pets_api::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load_for_service("pets-api")?;

    // Initialize tracing
    init_tracing(&config)?;

    info!("Starting pets API service");

    // Build application state (connects the store, bootstraps the schema)
    let state = AppState::builder()
        .config(config.clone())
        .build()
        .await?;

    // Build router: pet routes under /api plus health probes
    let app = Router::new()
        .nest("/api", handlers::routes())
        .route("/health", get(health))
        .route("/ready", get(readiness))
        .with_state(state);

    // Run server
    Server::new(config).serve(app).await?;

    Ok(())
}
