use crate::udp::structs::number_of_downloads::NumberOfDownloads;
use crate::udp::structs::number_of_peers::NumberOfPeers;

/// One `(seeders, completed, leechers)` triple of a scrape response.
///
/// `completed` is reported as `-1`: downloads are not tracked, and that is
/// the value long-standing clients expect for "unknown".
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct TorrentScrapeStatistics {
    pub seeders: NumberOfPeers,
    pub completed: NumberOfDownloads,
    pub leechers: NumberOfPeers,
}
