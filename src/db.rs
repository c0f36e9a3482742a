use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub const IN_MEMORY_URL: &str = "sqlite::memory:";

pub fn is_in_memory(url: &str) -> bool {
    url == IN_MEMORY_URL || url.contains(":memory:") || url.contains("mode=memory")
}

/// Open a pool for `url`, creating the database file if needed.
///
/// Each SQLite connection to `:memory:` sees its own database, so in-memory
/// pools hold exactly one connection that is never closed while the pool lives.
pub async fn connect(url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("parse database url {url}"))?
        .create_if_missing(true);

    let pool_options = if is_in_memory(url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(10)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("connect to sqlite via {url}"))?;

    tracing::debug!(%url, "database pool ready");
    Ok(pool)
}
