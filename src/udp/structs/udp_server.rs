use std::sync::Arc;
use tokio::net::UdpSocket;
use crate::tracker::structs::torrent_tracker::TorrentTracker;
use crate::udp::structs::connection_cache::ConnectionCache;

pub struct UdpServer {
    pub socket: Arc<UdpSocket>,
    pub tracker: Arc<TorrentTracker>,
    pub connection_cache: Arc<ConnectionCache>,
}
