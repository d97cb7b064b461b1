use catalog_api::{api, config, errors::Result};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the application configuration from the environment
    let app_config = config::AppConfig::from_env()
        .inspect_err(|e| error!("Failed to load configuration: {e}"))?;

    // 4. Initialize the database and create tables from the entities
    let db = config::database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Serve the API
    let bind_addr = app_config.bind_addr.clone();
    let state = api::AppState::new(db, Arc::new(app_config));
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
