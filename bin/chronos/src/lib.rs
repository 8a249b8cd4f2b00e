pub mod observability;
pub mod utility;

pub use chronos_primitives::error::ApiError;

use crate::utility::db_pool::create_db_pool;
use crate::utility::logging::setup_logging;
use crate::utility::server::serve;
use crate::utility::tasks::{build_router, load_env};
use chronos_core::AppState;
use chronos_primitives::models::app_config::AppConfig;
use eyre::Report;
use tracing::info;

pub async fn run() -> Result<(), Report> {
    // 1. load environment variables
    load_env();

    // 2. logging before anything that might fail
    setup_logging();

    info!("Starting Chronos...");

    // 3. configuration
    let config = AppConfig::from_env()?;

    // 4. database pool
    let pool = create_db_pool()?;

    // 5. application state
    let state = AppState::new(pool, config)?;

    // 6. metrics
    let (metric_layer, metric_handle) = observability::metrics::setup_metrics();

    // 7. router
    let app = build_router(state, metric_layer, metric_handle)?;

    // 8. serve until a shutdown signal arrives
    serve(app).await?;

    info!("Chronos shut down gracefully");
    Ok(())
}
