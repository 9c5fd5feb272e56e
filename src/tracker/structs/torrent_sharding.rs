use std::collections::BTreeMap;
use std::sync::Arc;
use parking_lot::RwLock;
use crate::tracker::structs::info_hash::InfoHash;
use crate::tracker::structs::torrent_entry::TorrentEntry;

pub type Shard = Arc<RwLock<BTreeMap<InfoHash, TorrentEntry>>>;

/// Sharded torrent map.
///
/// The shard count is a power of two (1024 by default) and a torrent's
/// shard is selected by the low bits of its info hash, so the swarms spread
/// evenly and a lock only ever covers a slice of the keyspace.
pub struct TorrentSharding {
    pub shards: Vec<Shard>,
    pub mask: usize,
}
