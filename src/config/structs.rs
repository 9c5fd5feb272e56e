/// Root configuration container.
pub mod configuration;

/// Core announce/peer handling settings.
pub mod tracker_config;

/// Peer database sharding and snapshot settings.
pub mod peer_db_config;

/// Per-listener UDP tracker settings.
pub mod udp_trackers_config;

/// Per-listener HTTP tracker settings.
pub mod http_trackers_config;
