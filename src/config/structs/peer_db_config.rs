use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PeerDbConfig {
    /// Shard count of the in-memory torrent map. Must be a power of two.
    pub shards: u64,
    /// Snapshot file path. Interval snapshots go to `<path>.tmp`, the
    /// shutdown snapshot to `<path>` itself.
    pub snapshot_path: String,
    /// Interval of the snapshot task, in seconds. Zero disables it.
    pub snapshot_interval: u64,
}
