use serde::{Deserialize, Serialize};

/// Point-in-time copy of every statistics counter.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct Stats {
    pub started: i64,
    pub torrents: i64,
    pub seeds: i64,
    pub peers: i64,
    pub completed: i64,
    pub tcp4_failure: i64,
    pub tcp4_announces_handled: i64,
    pub tcp4_scrapes_handled: i64,
    pub tcp4_not_found: i64,
    pub tcp6_failure: i64,
    pub tcp6_announces_handled: i64,
    pub tcp6_scrapes_handled: i64,
    pub tcp6_not_found: i64,
    pub udp4_bad_request: i64,
    pub udp4_invalid_request: i64,
    pub udp4_connections_handled: i64,
    pub udp4_announces_handled: i64,
    pub udp4_scrapes_handled: i64,
    pub udp6_bad_request: i64,
    pub udp6_invalid_request: i64,
    pub udp6_connections_handled: i64,
    pub udp6_announces_handled: i64,
    pub udp6_scrapes_handled: i64,
}
