use dotenvy::dotenv;
use std::path::Path;
use storefront::errors::Result;
use storefront::http::{AppState, create_router};
use storefront::{config, config::seed};
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
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Connect to the database and ensure the schema exists
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|()| info!("Database tables ensured."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 4. Seed initial categories when a config.toml is present
    if Path::new("config.toml").exists() {
        let seed_config = seed::load_seed_config("config.toml")?;
        seed::seed_initial_categories(&db, &seed_config)
            .await
            .inspect(|()| info!("Initial categories seeded."))
            .inspect_err(|e| error!("Failed to seed categories: {}", e))?;
    }

    // 5. Serve the API
    let bind_address = config::server::get_bind_address();
    let app = create_router(AppState::new(db));
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on {}", bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
