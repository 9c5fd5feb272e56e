mod common;

use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use swarmtrack::tracker::enums::torrent_peers_type::TorrentPeersType;
use swarmtrack::tracker::structs::info_hash::InfoHash;
use swarmtrack::tracker::structs::torrent_tracker::TorrentTracker;

fn populate(tracker: &Arc<TorrentTracker>, swarms: usize, peers_per_swarm: usize) -> Vec<InfoHash> {
    let mut info_hashes = Vec::new();
    for swarm in 0..swarms {
        let info_hash = common::random_info_hash();
        info_hashes.push(info_hash);
        for peer in 0..peers_per_swarm {
            let peer_id = common::random_peer_id();
            let ip = IpAddr::V4(Ipv4Addr::new(10, swarm as u8, 0, peer as u8 + 1));
            if peer % 2 == 0 {
                tracker.add_torrent_peer(info_hash, peer_id, common::create_test_seed(peer_id, ip, 6881));
            } else {
                tracker.add_torrent_peer(info_hash, peer_id, common::create_test_peer(peer_id, ip, 6881));
            }
        }
    }
    info_hashes
}

fn sample_as_multiset(tracker: &Arc<TorrentTracker>, info_hash: InfoHash) -> BTreeSet<SocketAddr> {
    tracker.sample_torrent_peers(info_hash, 1000, None, TorrentPeersType::All, false)
        .into_iter()
        .map(|(_, peer_addr)| peer_addr)
        .collect()
}

#[test]
fn test_snapshot_round_trip() {
    let dir = common::create_temp_dir();
    let tracker = common::create_test_tracker_with_snapshot_dir(&dir);
    let info_hashes = populate(&tracker, 3, 5);

    let path = Path::new(&tracker.config.peer_db.snapshot_path).to_path_buf();
    let saved = tracker.save_snapshot(&path).unwrap();
    assert_eq!(saved, 3);

    let reloaded = Arc::new(TorrentTracker::new(tracker.config.clone()));
    assert_eq!(reloaded.load_snapshot(), 3);

    let stats = reloaded.get_stats();
    assert_eq!(stats.torrents, 3);
    assert_eq!(stats.seeds, 9);
    assert_eq!(stats.peers, 6);

    for info_hash in info_hashes {
        let original = tracker.get_torrent(info_hash).unwrap();
        let restored = reloaded.get_torrent(info_hash).unwrap();
        assert_eq!(original.seeds, restored.seeds, "Seed records must survive the round trip");
        assert_eq!(original.peers, restored.peers, "Peer records must survive the round trip");
        assert_eq!(sample_as_multiset(&tracker, info_hash), sample_as_multiset(&reloaded, info_hash));
    }
}

#[test]
fn test_snapshot_is_deterministic() {
    let dir = common::create_temp_dir();
    let tracker = common::create_test_tracker_with_snapshot_dir(&dir);
    populate(&tracker, 4, 3);

    let first = dir.path().join("first.snapshot");
    let second = dir.path().join("second.snapshot");
    tracker.save_snapshot(&first).unwrap();
    tracker.save_snapshot(&second).unwrap();
    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn test_loader_prefers_newer_file() {
    let dir = common::create_temp_dir();
    let tracker = common::create_test_tracker_with_snapshot_dir(&dir);
    populate(&tracker, 1, 2);

    let path = Path::new(&tracker.config.peer_db.snapshot_path).to_path_buf();
    let tmp_path = TorrentTracker::snapshot_tmp_path(&path);
    tracker.save_snapshot(&path).unwrap();

    // newer state with one more swarm goes to the tmp file
    std::thread::sleep(Duration::from_millis(1100));
    populate(&tracker, 1, 2);
    tracker.save_snapshot(&tmp_path).unwrap();

    let reloaded = Arc::new(TorrentTracker::new(tracker.config.clone()));
    assert_eq!(reloaded.load_snapshot(), 2, "The newer tmp snapshot wins");
}

#[test]
fn test_loader_falls_back_on_corrupt_file() {
    let dir = common::create_temp_dir();
    let tracker = common::create_test_tracker_with_snapshot_dir(&dir);
    populate(&tracker, 2, 2);

    let path = Path::new(&tracker.config.peer_db.snapshot_path).to_path_buf();
    let tmp_path = TorrentTracker::snapshot_tmp_path(&path);
    tracker.save_snapshot(&path).unwrap();

    std::thread::sleep(Duration::from_millis(1100));
    std::fs::write(&tmp_path, b"garbage, definitely not a snapshot").unwrap();

    let reloaded = Arc::new(TorrentTracker::new(tracker.config.clone()));
    assert_eq!(reloaded.load_snapshot(), 2, "Corrupt newer file falls back to the older one");
}

#[test]
fn test_loader_survives_truncated_snapshot() {
    let dir = common::create_temp_dir();
    let tracker = common::create_test_tracker_with_snapshot_dir(&dir);
    populate(&tracker, 2, 3);

    let path = Path::new(&tracker.config.peer_db.snapshot_path).to_path_buf();
    tracker.save_snapshot(&path).unwrap();
    let data = std::fs::read(&path).unwrap();
    std::fs::write(&path, &data[..data.len() / 2]).unwrap();

    let reloaded = Arc::new(TorrentTracker::new(tracker.config.clone()));
    assert_eq!(reloaded.load_snapshot(), 0, "Truncated snapshot loads as empty, not a crash");
    assert_eq!(reloaded.get_stats().torrents, 0);
}

#[test]
fn test_loader_with_no_files_starts_empty() {
    let dir = common::create_temp_dir();
    let tracker = common::create_test_tracker_with_snapshot_dir(&dir);
    assert_eq!(tracker.load_snapshot(), 0);
    assert_eq!(tracker.get_stats().torrents, 0);
}
