pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod redis_client;
pub mod services;
pub mod store;

use std::sync::Arc;

use services::{AssignmentEngine, Authorizer, ChartAggregator, LayoutService};
use store::{EventDirectory, PgEventDirectory, PgSeatingStore, SeatingStore};

// Shared state for the whole application
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub cache: cache::CacheService,
    pub config: config::Config,
    pub store: Arc<dyn SeatingStore>,
    pub layout: LayoutService,
    pub engine: AssignmentEngine,
    pub charts: ChartAggregator,
}

impl AppState {
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        use anyhow::Context;

        let db = database::Database::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        db.migrate()
            .await
            .context("failed to run migrations")?;

        let redis = redis_client::RedisClient::connect(&config.redis)
            .await
            .context("failed to connect to Redis")?;
        tracing::info!("Redis connected");
        let cache = cache::CacheService::new(redis, config.redis.seat_cache_ttl_secs);

        let store: Arc<dyn SeatingStore> = Arc::new(PgSeatingStore::new(db.pool.clone()));
        let directory: Arc<dyn EventDirectory> = Arc::new(PgEventDirectory::new(db.pool.clone()));

        Ok(Arc::new(Self {
            db,
            cache,
            config,
            layout: LayoutService::new(store.clone(), Authorizer::new(store.clone(), directory.clone())),
            engine: AssignmentEngine::new(
                store.clone(),
                directory.clone(),
                Authorizer::new(store.clone(), directory.clone()),
            ),
            charts: ChartAggregator::new(store.clone(), Authorizer::new(store.clone(), directory)),
            store,
        }))
    }
}
