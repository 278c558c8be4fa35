use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordsConfig {
    /// TTL applied when a write does not name one.
    #[serde(default = "default_ttl")]
    pub default_ttl: u32,

    /// Splits multiple rdata values in an API write path. TXT data
    /// containing this string cannot be written through the API.
    #[serde(default = "default_rdata_separator")]
    pub rdata_separator: String,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            default_ttl: default_ttl(),
            rdata_separator: default_rdata_separator(),
        }
    }
}

fn default_ttl() -> u32 {
    60
}

fn default_rdata_separator() -> String {
    ",".to_string()
}
