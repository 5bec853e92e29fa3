use bookdrop::api::{build_router, AppState};
use bookdrop::config::{Config, StoreBackend};
use bookdrop::services::SmtpMailer;
use bookdrop::store::{JsonStore, SqlStore, Store};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookdrop=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Construct the persistence backend
    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Json => {
            tracing::info!("Using JSON document store at {}", config.json_db_path);
            Arc::new(JsonStore::new(&config.json_db_path))
        }
        StoreBackend::Sql => {
            let url = config
                .database_url
                .as_deref()
                .ok_or("DATABASE_URL not set")?;
            let store = SqlStore::connect(url).await?;
            tracing::info!("Database connection established");
            Arc::new(store)
        }
    };

    // Build application state
    let state = AppState {
        store,
        mailer: Arc::new(SmtpMailer),
    };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.server_address()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
