/// Parsed announce request parameters.
pub mod announce_query_request;

/// 20-byte torrent identifier.
pub mod info_hash;

/// 20-byte peer identifier.
pub mod peer_id;

/// Parsed scrape request parameters.
pub mod scrape_query_request;

/// Per-torrent swarm state.
pub mod torrent_entry;

/// Individual peer record.
pub mod torrent_peer;

/// Sharded torrent storage.
pub mod torrent_sharding;

/// The tracker instance.
pub mod torrent_tracker;
