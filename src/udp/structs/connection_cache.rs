use std::collections::HashMap;
use parking_lot::RwLock;
use crate::udp::structs::connection_entry::ConnectionEntry;
use crate::udp::structs::connection_id::ConnectionId;

/// Short-lived store of issued UDP connection ids.
///
/// Sharded by the low bits of the token so concurrent connects and checks
/// do not fight over a single lock. When `validate` is off the cache
/// becomes a pass-through and `check` accepts anything; that mode is an
/// explicit operator opt-in and the runtime warns about it at startup.
pub struct ConnectionCache {
    pub shards: Vec<RwLock<HashMap<ConnectionId, ConnectionEntry>>>,
    pub validate: bool,
    /// Token lifetime in seconds.
    pub ttl: u64,
}
