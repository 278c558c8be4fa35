use hatedns_domain::config::DatabaseConfig;
use hatedns_infrastructure::database::create_pool;
use sqlx::SqlitePool;
use tracing::{error, info};

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    info!(path = %cfg.path, "Persisting records");

    let pool = create_pool(cfg).await.map_err(|e| {
        error!("Failed to initialize database: {}", e);
        anyhow::anyhow!(e)
    })?;

    if cfg.is_in_memory() {
        info!("Database initialized (in memory, records are lost on exit)");
    } else {
        info!(max_connections = cfg.max_connections, "Database initialized");
    }

    Ok(pool)
}
