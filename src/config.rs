use serde::Deserialize;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://fast_zero.db";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("APP_PORT={v:?} is not a port: {e}"))?,
            Err(_) => 8080,
        };
        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    /// Configuration for a throwaway in-memory database.
    pub fn in_memory() -> Self {
        Self {
            database_url: crate::db::IN_MEMORY_URL.into(),
            host: "127.0.0.1".into(),
            port: 0,
        }
    }
}
