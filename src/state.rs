use crate::clock::Clock;
use crate::config::AppConfig;
use crate::schema::Schema;
use crate::session::Session;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub clock: Clock,
}

impl AppState {
    /// Connect to the configured database and make sure `schema` exists in it.
    pub async fn init(config: AppConfig, schema: &Schema) -> anyhow::Result<Self> {
        let db = crate::db::connect(&config.database_url).await?;
        schema.create_all(&db).await?;
        Ok(Self::from_parts(db, Arc::new(config), Clock::Database))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>, clock: Clock) -> Self {
        Self { db, config, clock }
    }

    /// A fresh unit of work using this state's clock.
    pub fn session(&self) -> Session {
        Session::new(self.db.clone()).with_clock(self.clock)
    }
}
