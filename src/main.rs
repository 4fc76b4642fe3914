use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use timetable_api::{ApiState, advisor::GatewayAdvisor, config::ApiConfig};
use timetable_core::store::{TimetableStorage, TimetableStore};
use timetable_db::{
    create_pool,
    schema::initialize_database,
    storage::{FileStorage, PgStorage},
};
use tracing::info;

async fn open_storage(config: &ApiConfig) -> Result<Arc<dyn TimetableStorage>> {
    match &config.database_url {
        Some(database_url) => {
            // Create database connection pool
            let db_pool = create_pool(database_url).await?;

            // Initialize database schema
            initialize_database(&db_pool).await?;

            info!("Using PostgreSQL storage");
            Ok(Arc::new(PgStorage::new(db_pool)))
        }
        None => {
            info!("Using file storage in {}", config.data_dir.display());
            Ok(Arc::new(FileStorage::new(&config.data_dir)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    timetable_api::init_tracing(config.log_level)?;

    let storage = open_storage(&config).await?;
    let store = TimetableStore::open(storage, &config.storage_key).await?;
    let advisor = GatewayAdvisor::new(config.gateway.clone())?;

    let state = Arc::new(ApiState::new(
        store,
        Arc::new(advisor),
        config.public_url.clone(),
        config.timezone,
    ));

    // Start API server
    timetable_api::start_server(config, state).await?;

    Ok(())
}
