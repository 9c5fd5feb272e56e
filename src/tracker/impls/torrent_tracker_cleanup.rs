use std::time::Duration;
use log::info;
use tokio::sync::watch;
use crate::common::common::{current_time, shutdown_requested};
use crate::stats::enums::stats_event::StatsEvent;
use crate::tracker::structs::torrent_tracker::TorrentTracker;

impl TorrentTracker {
    /// Expiry sweep: walks the shards round-robin and removes every peer
    /// record that has not re-announced within `timeout`. Swarms that end
    /// up empty are dropped. One shard write lock is held at a time, and
    /// the task yields between shards so announces keep their tail latency.
    ///
    /// Returns `(torrents_removed, seeds_removed, peers_removed)`.
    pub async fn clean_peers(&self, timeout: Duration, shutdown: Option<&watch::Receiver<bool>>) -> (u64, u64, u64) {
        let cutoff = current_time().saturating_sub(timeout.as_secs());
        let (mut torrents_removed, mut seeds_removed, mut peers_removed) = (0u64, 0u64, 0u64);

        for shard in self.torrents_sharding.shards.iter() {
            if let Some(rx) = shutdown {
                if shutdown_requested(rx) {
                    break;
                }
            }

            {
                let mut shard_write = shard.write();
                if shard_write.is_empty() {
                    continue;
                }

                shard_write.retain(|_, torrent_entry| {
                    let seeds_before = torrent_entry.seeds.len();
                    let peers_before = torrent_entry.peers.len();
                    torrent_entry.seeds.retain(|_, torrent_peer| torrent_peer.updated >= cutoff);
                    torrent_entry.peers.retain(|_, torrent_peer| torrent_peer.updated >= cutoff);
                    seeds_removed += (seeds_before - torrent_entry.seeds.len()) as u64;
                    peers_removed += (peers_before - torrent_entry.peers.len()) as u64;

                    if torrent_entry.seeds.is_empty() && torrent_entry.peers.is_empty() {
                        torrents_removed += 1;
                        false
                    } else {
                        true
                    }
                });
            }

            tokio::task::yield_now().await;
        }

        if torrents_removed > 0 {
            self.update_stats(StatsEvent::Torrents, -(torrents_removed as i64));
        }
        if seeds_removed > 0 {
            self.update_stats(StatsEvent::Seeds, -(seeds_removed as i64));
        }
        if peers_removed > 0 {
            self.update_stats(StatsEvent::Peers, -(peers_removed as i64));
        }

        if torrents_removed > 0 || seeds_removed > 0 || peers_removed > 0 {
            info!("[PEERS] Torrents: {torrents_removed} - Seeds: {seeds_removed} - Peers: {peers_removed}");
        }

        (torrents_removed, seeds_removed, peers_removed)
    }
}
