use std::collections::BTreeMap;
use crate::common::common::current_time;
use crate::tracker::structs::torrent_entry::TorrentEntry;

impl TorrentEntry {
    pub fn new() -> TorrentEntry {
        TorrentEntry {
            seeds: BTreeMap::new(),
            peers: BTreeMap::new(),
            updated: current_time(),
        }
    }
}

impl Default for TorrentEntry {
    fn default() -> Self {
        Self::new()
    }
}
