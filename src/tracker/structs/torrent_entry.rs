use std::collections::BTreeMap;
use crate::tracker::structs::peer_id::PeerId;
use crate::tracker::structs::torrent_peer::TorrentPeer;

pub type PeerMap = BTreeMap<PeerId, TorrentPeer>;

/// One swarm: the set of live peers for a single info hash.
///
/// A peer with `left == 0` lives in `seeds`, anyone else in `peers`, so the
/// `complete`/`incomplete` counters reported on announce and scrape are the
/// map lengths and cost nothing to read. A record moves between the maps
/// when a re-announce flips its completion state.
#[derive(Debug, Clone)]
pub struct TorrentEntry {
    pub seeds: PeerMap,
    pub peers: PeerMap,
    /// Unix timestamp (seconds) of the last announce touching this swarm.
    pub updated: u64,
}
