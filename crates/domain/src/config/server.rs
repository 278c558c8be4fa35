use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// UDP and TCP port for the DNS listeners.
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    /// Port of the administrative HTTP API.
    #[serde(default = "default_web_port")]
    pub web_port: u16,

    /// Seconds a TCP client may stay silent between frames before the
    /// connection is closed. `0` disables the limit.
    #[serde(default = "default_tcp_idle_timeout_secs")]
    pub tcp_idle_timeout_secs: u64,

    /// Datagrams handled concurrently. Reading pauses while all slots are
    /// busy.
    #[serde(default = "default_udp_max_in_flight")]
    pub udp_max_in_flight: usize,
}

impl ServerConfig {
    pub fn tcp_idle_timeout(&self) -> Option<Duration> {
        match self.tcp_idle_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            dns_port: default_dns_port(),
            web_port: default_web_port(),
            tcp_idle_timeout_secs: default_tcp_idle_timeout_secs(),
            udp_max_in_flight: default_udp_max_in_flight(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_dns_port() -> u16 {
    5337
}

fn default_web_port() -> u16 {
    8053
}

fn default_tcp_idle_timeout_secs() -> u64 {
    30
}

fn default_udp_max_in_flight() -> usize {
    1024
}
