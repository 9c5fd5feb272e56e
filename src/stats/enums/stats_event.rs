use serde::{Deserialize, Serialize};

/// Enumeration of all trackable statistics events.
///
/// Each variant names a counter that can be incremented, decremented or set
/// through `TorrentTracker::update_stats()` / `set_stats()`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub enum StatsEvent {
    Torrents,
    Seeds,
    Peers,
    Completed,
    Tcp4Failure,
    Tcp4AnnouncesHandled,
    Tcp4ScrapesHandled,
    Tcp4NotFound,
    Tcp6Failure,
    Tcp6AnnouncesHandled,
    Tcp6ScrapesHandled,
    Tcp6NotFound,
    Udp4BadRequest,
    Udp4InvalidRequest,
    Udp4ConnectionsHandled,
    Udp4AnnouncesHandled,
    Udp4ScrapesHandled,
    Udp6BadRequest,
    Udp6InvalidRequest,
    Udp6ConnectionsHandled,
    Udp6AnnouncesHandled,
    Udp6ScrapesHandled,
}
