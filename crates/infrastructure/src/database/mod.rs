use hatedns_domain::config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens the record database and applies pending migrations.
///
/// An in-memory database lives only as long as its connection, so it gets a
/// single connection that is never recycled. File databases run in WAL mode.
pub async fn create_pool(cfg: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let pool = if cfg.is_in_memory() {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        let options = SqliteConnectOptions::new()
            .filename(&cfg.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(cfg.busy_timeout_secs));
        SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .connect_with(options)
            .await?
    };

    MIGRATOR.run(&pool).await?;
    Ok(pool)
}
