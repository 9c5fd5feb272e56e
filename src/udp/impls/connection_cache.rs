use std::collections::HashMap;
use std::net::IpAddr;
use parking_lot::RwLock;
use crate::common::common::current_time;
use crate::udp::structs::connection_cache::ConnectionCache;
use crate::udp::structs::connection_entry::ConnectionEntry;
use crate::udp::structs::connection_id::ConnectionId;

const CONNECTION_CACHE_SHARDS: usize = 64;

impl ConnectionCache {
    pub fn new(validate: bool, ttl: u64) -> ConnectionCache {
        ConnectionCache {
            shards: (0..CONNECTION_CACHE_SHARDS).map(|_| RwLock::new(HashMap::new())).collect(),
            validate,
            ttl,
        }
    }

    #[inline(always)]
    fn shard(&self, connection_id: ConnectionId) -> &RwLock<HashMap<ConnectionId, ConnectionEntry>> {
        &self.shards[(connection_id.0 as u64 as usize) & (CONNECTION_CACHE_SHARDS - 1)]
    }

    /// Issues a fresh token bound to `remote_ip`.
    pub fn issue(&self, remote_ip: IpAddr) -> ConnectionId {
        let connection_id = ConnectionId(rand::random::<i64>());
        self.shard(connection_id).write().insert(connection_id, ConnectionEntry {
            remote_ip,
            issued_at: current_time(),
        });
        connection_id
    }

    /// True when a non-expired entry exists for this token and address.
    ///
    /// With validation disabled every token passes; the server is then an
    /// open reflector and says so at startup.
    pub fn check(&self, connection_id: ConnectionId, remote_ip: IpAddr) -> bool {
        if !self.validate {
            return true;
        }
        match self.shard(connection_id).read().get(&connection_id) {
            None => false,
            Some(entry) => {
                entry.remote_ip == remote_ip && current_time().saturating_sub(entry.issued_at) <= self.ttl
            }
        }
    }

    /// Drops expired entries. Returns how many were removed.
    pub fn trim(&self) -> usize {
        let cutoff = current_time().saturating_sub(self.ttl);
        let mut removed = 0;
        for shard in self.shards.iter() {
            let mut shard_write = shard.write();
            let before = shard_write.len();
            shard_write.retain(|_, entry| entry.issued_at >= cutoff);
            removed += before - shard_write.len();
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
