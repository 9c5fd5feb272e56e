use std::sync::Arc;
use std::sync::atomic::Ordering;
use crate::common::common::current_time;
use crate::config::structs::configuration::Configuration;
use crate::stats::structs::stats_atomics::StatsAtomics;
use crate::tracker::structs::torrent_sharding::TorrentSharding;
use crate::tracker::structs::torrent_tracker::TorrentTracker;

impl TorrentTracker {
    pub fn new(config: Arc<Configuration>) -> TorrentTracker {
        let stats = Arc::new(StatsAtomics::default());
        stats.started.store(current_time() as i64, Ordering::Relaxed);
        TorrentTracker {
            torrents_sharding: TorrentSharding::new(config.peer_db.shards as usize),
            config,
            stats,
        }
    }
}
