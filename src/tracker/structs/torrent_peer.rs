use std::net::SocketAddr;
use crate::common::structs::number_of_bytes::NumberOfBytes;
use crate::tracker::enums::announce_event::AnnounceEvent;
use crate::tracker::structs::peer_id::PeerId;

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct TorrentPeer {
    pub peer_id: PeerId,
    pub peer_addr: SocketAddr,
    /// Unix timestamp (seconds) of the last announce. Never decreases.
    pub updated: u64,
    pub uploaded: NumberOfBytes,
    pub downloaded: NumberOfBytes,
    pub left: NumberOfBytes,
    pub event: AnnounceEvent,
}
