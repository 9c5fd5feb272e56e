/// Announce event enumeration.
pub mod announce_event;

/// Address family selector for peer list sampling.
pub mod torrent_peers_type;
