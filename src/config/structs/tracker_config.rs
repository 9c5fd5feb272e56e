use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrackerConfig {
    /// Announce interval handed to clients, in seconds.
    pub announce_interval: u64,
    /// Minimum announce interval handed to clients, in seconds.
    pub announce_interval_minimum: u64,
    /// Seconds without a re-announce after which a peer is expired.
    pub peers_timeout: u64,
    /// Interval of the expiry sweep, in seconds.
    pub peers_cleanup_interval: u64,
    /// Peers returned when the client does not ask for a specific amount.
    pub numwant_default: u64,
    /// Hard cap on the peers returned by a single announce.
    pub numwant_limit: u64,
    /// Whether UDP connection ids are bound to the requester address.
    ///
    /// Disabling this leaves the UDP port usable as an amplification
    /// reflector; the server logs a warning at startup when it is off.
    pub conn_id_validate: bool,
    /// Lifetime of an issued UDP connection id, in seconds.
    pub conn_id_ttl: u64,
    /// Interval of the connection id trim task, in seconds.
    pub conn_id_trim_interval: u64,
}
