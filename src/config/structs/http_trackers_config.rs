use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HttpTrackersConfig {
    pub enabled: bool,
    pub bind_address: String,
    pub threads: u64,
    /// Keep-alive in seconds. Zero disables keep-alive entirely.
    pub keep_alive: u64,
    /// Seconds a client gets to send the full request head.
    pub request_timeout: u64,
    /// Seconds allowed for the connection shutdown handshake.
    pub disconnect_timeout: u64,
}
