//! Application state for laundry-cloud

use chrono_tz::Tz;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Business timezone (date → millis range conversion)
    pub timezone: Tz,
}

impl AppState {
    /// Connect the pool and run pending migrations
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self::with_pool(pool, config.business_timezone))
    }

    pub fn with_pool(pool: PgPool, timezone: Tz) -> Self {
        Self { pool, timezone }
    }
}
