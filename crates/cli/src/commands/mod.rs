pub mod init;
pub mod serve;
pub mod status;

use campus_core::config::CampusConfig;
use campus_core::db::sqlite::SqliteRepository;
use campus_core::db::DatabasePool;

/// Open the configured database, applying the schema if needed.
pub async fn open_repository(config: &CampusConfig) -> anyhow::Result<SqliteRepository> {
    let connect_str = config
        .campus
        .database
        .connect_url()
        .ok_or_else(|| anyhow::anyhow!("SQLite path not configured"))?;
    let DatabasePool::Sqlite(pool) = DatabasePool::new_sqlite(&connect_str).await?;
    Ok(SqliteRepository::new(pool))
}
