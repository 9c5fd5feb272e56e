use std::collections::btree_map::Entry;
use std::net::SocketAddr;
use rand::Rng;
use crate::common::common::current_time;
use crate::common::structs::number_of_bytes::NumberOfBytes;
use crate::stats::enums::stats_event::StatsEvent;
use crate::tracker::enums::torrent_peers_type::TorrentPeersType;
use crate::tracker::structs::info_hash::InfoHash;
use crate::tracker::structs::peer_id::PeerId;
use crate::tracker::structs::torrent_entry::{PeerMap, TorrentEntry};
use crate::tracker::structs::torrent_peer::TorrentPeer;
use crate::tracker::structs::torrent_tracker::TorrentTracker;

impl TorrentTracker {
    pub fn get_torrent(&self, info_hash: InfoHash) -> Option<TorrentEntry> {
        self.torrents_sharding.get_torrent(info_hash)
    }

    /// Inserts or replaces a peer record, keeping the seed/leech split and
    /// the global counters consistent with the transition.
    ///
    /// Returns the swarm as it was before the call (if it existed) and as it
    /// is afterwards.
    pub fn add_torrent_peer(&self, info_hash: InfoHash, peer_id: PeerId, mut torrent_peer: TorrentPeer) -> (Option<TorrentEntry>, TorrentEntry) {
        let shard = self.torrents_sharding.get_shard(&info_hash);
        let mut lock = shard.write();

        match lock.entry(info_hash) {
            Entry::Vacant(v) => {
                let mut torrent_entry = TorrentEntry::new();

                self.update_stats(StatsEvent::Torrents, 1);

                if torrent_peer.left == NumberOfBytes(0) {
                    self.update_stats(StatsEvent::Seeds, 1);
                    torrent_entry.seeds.insert(peer_id, torrent_peer);
                } else {
                    self.update_stats(StatsEvent::Peers, 1);
                    torrent_entry.peers.insert(peer_id, torrent_peer);
                }

                let entry_clone = torrent_entry.clone();
                v.insert(torrent_entry);
                (None, entry_clone)
            }
            Entry::Occupied(mut o) => {
                let previous_torrent = o.get().clone();
                let entry = o.get_mut();

                let previous_record = match entry.seeds.remove(&peer_id) {
                    Some(previous) => Some(previous),
                    None => entry.peers.remove(&peer_id),
                };
                if let Some(previous) = &previous_record {
                    if previous.left == NumberOfBytes(0) {
                        self.update_stats(StatsEvent::Seeds, -1);
                    } else {
                        self.update_stats(StatsEvent::Peers, -1);
                    }
                    // last_seen is monotonic even if the clock is not
                    if previous.updated > torrent_peer.updated {
                        torrent_peer.updated = previous.updated;
                    }
                }

                if torrent_peer.left == NumberOfBytes(0) {
                    self.update_stats(StatsEvent::Seeds, 1);
                    entry.seeds.insert(peer_id, torrent_peer);
                } else {
                    self.update_stats(StatsEvent::Peers, 1);
                    entry.peers.insert(peer_id, torrent_peer);
                }

                if entry.updated < current_time() {
                    entry.updated = current_time();
                }

                (Some(previous_torrent), entry.clone())
            }
        }
    }

    /// Removes a peer record. Idempotent: removing an absent peer (or a peer
    /// of an unknown torrent) is a no-op. An emptied swarm is dropped.
    pub fn remove_torrent_peer(&self, info_hash: InfoHash, peer_id: PeerId) -> (Option<TorrentEntry>, Option<TorrentEntry>) {
        let shard = self.torrents_sharding.get_shard(&info_hash);
        let mut lock = shard.write();

        match lock.entry(info_hash) {
            Entry::Vacant(_) => (None, None),
            Entry::Occupied(mut o) => {
                let previous_torrent = o.get().clone();
                let entry = o.get_mut();

                if entry.seeds.remove(&peer_id).is_some() {
                    self.update_stats(StatsEvent::Seeds, -1);
                }
                if entry.peers.remove(&peer_id).is_some() {
                    self.update_stats(StatsEvent::Peers, -1);
                }

                if entry.seeds.is_empty() && entry.peers.is_empty() {
                    o.remove();
                    self.update_stats(StatsEvent::Torrents, -1);
                    (Some(previous_torrent), None)
                } else {
                    (Some(previous_torrent), Some(entry.clone()))
                }
            }
        }
    }

    /// Samples up to `amount` peers from a swarm without copying it.
    ///
    /// Leechers are offered seeds first and leechers after; seeders are
    /// offered leechers only. The walk starts at a pseudo-random index of
    /// the map's iteration order and wraps around, so repeated announces
    /// spread over the whole swarm instead of always returning its head.
    /// The requesting peer is excluded by its peer id.
    pub fn sample_torrent_peers(&self, info_hash: InfoHash, amount: usize, exclude: Option<PeerId>, family: TorrentPeersType, seeding: bool) -> Vec<(PeerId, SocketAddr)> {
        let mut sampled = Vec::with_capacity(amount.min(64));
        if amount == 0 {
            return sampled;
        }

        let shard = self.torrents_sharding.get_shard(&info_hash);
        let lock = shard.read();
        let entry = match lock.get(&info_hash) {
            None => { return sampled; }
            Some(entry) => entry,
        };

        if !seeding {
            Self::sample_peer_map(&entry.seeds, amount, exclude, family, &mut sampled);
        }
        Self::sample_peer_map(&entry.peers, amount, exclude, family, &mut sampled);
        sampled
    }

    fn sample_peer_map(map: &PeerMap, amount: usize, exclude: Option<PeerId>, family: TorrentPeersType, sampled: &mut Vec<(PeerId, SocketAddr)>) {
        if sampled.len() >= amount || map.is_empty() {
            return;
        }
        let start = rand::rng().random_range(0..map.len());
        for (peer_id, torrent_peer) in map.iter().cycle().skip(start).take(map.len()) {
            if sampled.len() >= amount {
                break;
            }
            if exclude == Some(*peer_id) {
                continue;
            }
            let family_match = match family {
                TorrentPeersType::All => true,
                TorrentPeersType::IPv4 => torrent_peer.peer_addr.is_ipv4(),
                TorrentPeersType::IPv6 => torrent_peer.peer_addr.is_ipv6(),
            };
            if family_match {
                sampled.push((*peer_id, torrent_peer.peer_addr));
            }
        }
    }
}
