// Common test utilities and fixtures
#![allow(dead_code)]

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use swarmtrack::common::common::current_time;
use swarmtrack::common::structs::number_of_bytes::NumberOfBytes;
use swarmtrack::config::structs::configuration::Configuration;
use swarmtrack::tracker::enums::announce_event::AnnounceEvent;
use swarmtrack::tracker::structs::info_hash::InfoHash;
use swarmtrack::tracker::structs::peer_id::PeerId;
use swarmtrack::tracker::structs::torrent_peer::TorrentPeer;
use swarmtrack::tracker::structs::torrent_tracker::TorrentTracker;
use tempfile::TempDir;

/// Create a test configuration without any listeners.
pub fn create_test_config() -> Configuration {
    let mut config = Configuration::init();
    config.http_server.clear();
    config.udp_server.clear();
    config.peer_db.snapshot_path = String::from("test-peers.snapshot");
    config
}

/// Create a test tracker instance.
pub fn create_test_tracker() -> Arc<TorrentTracker> {
    Arc::new(TorrentTracker::new(Arc::new(create_test_config())))
}

/// Create a test tracker whose snapshot lives inside `dir`.
pub fn create_test_tracker_with_snapshot_dir(dir: &TempDir) -> Arc<TorrentTracker> {
    let mut config = create_test_config();
    config.peer_db.snapshot_path = dir.path().join("peers.snapshot").to_string_lossy().into_owned();
    Arc::new(TorrentTracker::new(Arc::new(config)))
}

/// Create a temporary directory for test files.
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Generate a random InfoHash for testing.
pub fn random_info_hash() -> InfoHash {
    InfoHash(rand::random::<[u8; 20]>())
}

/// Generate a random PeerId for testing.
pub fn random_peer_id() -> PeerId {
    PeerId(rand::random::<[u8; 20]>())
}

/// Create a test torrent peer (a leecher by default).
pub fn create_test_peer(peer_id: PeerId, ip: IpAddr, port: u16) -> TorrentPeer {
    TorrentPeer {
        peer_id,
        peer_addr: SocketAddr::new(ip, port),
        updated: current_time(),
        uploaded: NumberOfBytes(0),
        downloaded: NumberOfBytes(0),
        left: NumberOfBytes(1000),
        event: AnnounceEvent::Started,
    }
}

/// Create a test seed (a complete copy).
pub fn create_test_seed(peer_id: PeerId, ip: IpAddr, port: u16) -> TorrentPeer {
    let mut seed = create_test_peer(peer_id, ip, port);
    seed.left = NumberOfBytes(0);
    seed
}

/// Percent-encode raw bytes for use in a query string.
pub fn url_encode_binary(data: &[u8]) -> String {
    data.iter().map(|byte| format!("%{byte:02X}")).collect()
}
