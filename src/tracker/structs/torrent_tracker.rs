use std::sync::Arc;
use crate::config::structs::configuration::Configuration;
use crate::stats::structs::stats_atomics::StatsAtomics;
use crate::tracker::structs::torrent_sharding::TorrentSharding;

pub struct TorrentTracker {
    pub config: Arc<Configuration>,
    pub torrents_sharding: TorrentSharding,
    pub stats: Arc<StatsAtomics>,
}
