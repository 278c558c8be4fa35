use serde::{Deserialize, Serialize};

pub const IN_MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite database file, or `:memory:` for a volatile store.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Ignored for `:memory:`, which always uses a single connection so every
    /// task sees the same database.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}

fn default_db_path() -> String {
    IN_MEMORY_PATH.to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_busy_timeout_secs() -> u64 {
    5
}
