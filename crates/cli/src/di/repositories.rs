use hatedns_application::ports::RecordStore;
use hatedns_infrastructure::repositories::SqliteRecordStore;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, warn};

pub struct Repositories {
    pub records: Arc<SqliteRecordStore>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            records: Arc::new(SqliteRecordStore::new(pool)),
        }
    }

    pub async fn log_record_count(&self) {
        match self.records.count().await {
            Ok(count) => info!(record_sets = count, "Record store ready"),
            Err(e) => warn!(error = %e, "Could not count stored record sets"),
        }
    }
}
