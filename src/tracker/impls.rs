pub mod announce_event;
pub mod info_hash;
pub mod peer_id;
pub mod torrent_entry;
pub mod torrent_sharding;
pub mod torrent_tracker;
pub mod torrent_tracker_cleanup;
pub mod torrent_tracker_handlers;
pub mod torrent_tracker_peers;
pub mod torrent_tracker_snapshot;
