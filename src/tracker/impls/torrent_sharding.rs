use std::collections::BTreeMap;
use std::sync::Arc;
use parking_lot::RwLock;
use crate::tracker::structs::info_hash::InfoHash;
use crate::tracker::structs::torrent_entry::TorrentEntry;
use crate::tracker::structs::torrent_sharding::{Shard, TorrentSharding};

pub const DEFAULT_SHARD_COUNT: usize = 1024;

impl Default for TorrentSharding {
    fn default() -> Self {
        Self::new(DEFAULT_SHARD_COUNT)
    }
}

impl TorrentSharding {
    /// Builds the shard table. `shard_count` must be a power of two; the
    /// configuration loader rejects anything else before this is reached.
    pub fn new(shard_count: usize) -> TorrentSharding {
        assert!(shard_count.is_power_of_two());
        TorrentSharding {
            shards: (0..shard_count).map(|_| Arc::new(RwLock::new(BTreeMap::new()))).collect(),
            mask: shard_count - 1,
        }
    }

    /// Shard selection: the low 16 bits of the info hash, masked down to
    /// the configured shard count.
    #[inline(always)]
    pub fn shard_index(&self, info_hash: &InfoHash) -> usize {
        (((info_hash.0[18] as usize) << 8) | info_hash.0[19] as usize) & self.mask
    }

    #[inline(always)]
    pub fn get_shard(&self, info_hash: &InfoHash) -> &Shard {
        &self.shards[self.shard_index(info_hash)]
    }

    pub fn contains_torrent(&self, info_hash: InfoHash) -> bool {
        self.get_shard(&info_hash).read().contains_key(&info_hash)
    }

    pub fn get_torrent(&self, info_hash: InfoHash) -> Option<TorrentEntry> {
        self.get_shard(&info_hash).read().get(&info_hash).cloned()
    }

    pub fn get_torrents_amount(&self) -> u64 {
        self.shards.iter().map(|shard| shard.read().len() as u64).sum()
    }
}
