use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use mbs_core::constants::{
    DATA_STORE_KEY_ENV, DATA_STORE_URL_ENV, DEFAULT_REST_ADDR, ITEMS_FILE_ENV, REST_ADDR_ENV,
};
use mbs_core::{
    FeeScheduleStore, LookupService, MemoryStore, PostgrestStore, store_config_from_env_values,
};

/// Main entry point for the MBS estimator
///
/// Resolves configuration once, builds the fee-schedule store and serves the REST API with
/// Swagger UI.
///
/// # Environment Variables
/// - `SUPABASE_URL`: Base URL of the hosted fee schedule
/// - `SUPABASE_ANON_KEY`: Access key for the hosted fee schedule
/// - `MBS_ITEMS_FILE`: JSON file of `mbs_items` rows, served instead of the hosted store when set
/// - `MBS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the data store configuration is missing or invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mbs=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var(REST_ADDR_ENV).unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let store = match std::env::var(ITEMS_FILE_ENV).ok() {
        Some(path) => {
            tracing::info!("++ Serving fee schedule from {}", path);
            let json = tokio::fs::read_to_string(&path).await?;
            Arc::new(MemoryStore::from_json(&json)?) as Arc<dyn FeeScheduleStore>
        }
        None => {
            let cfg = store_config_from_env_values(
                std::env::var(DATA_STORE_URL_ENV).ok(),
                std::env::var(DATA_STORE_KEY_ENV).ok(),
            )?;
            tracing::info!("++ Using fee schedule at {}", cfg.base_url());
            Arc::new(PostgrestStore::new(&cfg)?) as Arc<dyn FeeScheduleStore>
        }
    };

    let app = api_rest::router(AppState::new(LookupService::new(store)));

    tracing::info!("++ Starting MBS REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
