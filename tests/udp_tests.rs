mod common;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use swarmtrack::udp::structs::connection_cache::ConnectionCache;
use swarmtrack::udp::structs::connection_id::ConnectionId;
use swarmtrack::udp::structs::udp_server::UdpServer;
use swarmtrack::udp::udp::PROTOCOL_IDENTIFIER;

fn test_cache() -> Arc<ConnectionCache> {
    Arc::new(ConnectionCache::new(true, 120))
}

fn connect_packet(transaction_id: u32) -> Vec<u8> {
    let mut packet = vec![];
    packet.write_i64::<BigEndian>(PROTOCOL_IDENTIFIER).unwrap();
    packet.write_u32::<BigEndian>(0).unwrap();
    packet.write_u32::<BigEndian>(transaction_id).unwrap();
    packet
}

#[allow(clippy::too_many_arguments)]
fn announce_packet(connection_id: i64, transaction_id: u32, info_hash: [u8; 20], peer_id: [u8; 20], left: u64, event: u32, numwant: i32, port: u16) -> Vec<u8> {
    let mut packet = vec![];
    packet.write_i64::<BigEndian>(connection_id).unwrap();
    packet.write_u32::<BigEndian>(1).unwrap();
    packet.write_u32::<BigEndian>(transaction_id).unwrap();
    packet.extend_from_slice(&info_hash);
    packet.extend_from_slice(&peer_id);
    packet.write_u64::<BigEndian>(0).unwrap(); // downloaded
    packet.write_u64::<BigEndian>(left).unwrap();
    packet.write_u64::<BigEndian>(0).unwrap(); // uploaded
    packet.write_u32::<BigEndian>(event).unwrap();
    packet.write_u32::<BigEndian>(0).unwrap(); // ip: use source
    packet.write_u32::<BigEndian>(0).unwrap(); // key
    packet.write_i32::<BigEndian>(numwant).unwrap();
    packet.write_u16::<BigEndian>(port).unwrap();
    packet
}

async fn connect(remote: SocketAddr, tracker: &Arc<swarmtrack::tracker::structs::torrent_tracker::TorrentTracker>, cache: &Arc<ConnectionCache>, transaction_id: u32) -> i64 {
    let response = UdpServer::handle_packet(remote, &connect_packet(transaction_id), tracker.clone(), cache.clone()).await.unwrap();
    let mut buffer = Vec::new();
    response.write(&mut buffer).unwrap();

    let mut cursor = Cursor::new(buffer.as_slice());
    assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), 0, "action must be connect");
    assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), transaction_id, "transaction id must be echoed");
    cursor.read_i64::<BigEndian>().unwrap()
}

#[tokio::test]
async fn test_udp_handshake_and_announce() {
    let tracker = common::create_test_tracker();
    let cache = test_cache();
    let remote = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 40001);

    let connection_id = connect(remote, &tracker, &cache, 0xDEADBEEF).await;
    assert!(cache.check(ConnectionId(connection_id), remote.ip()));

    let info_hash = common::random_info_hash();
    let peer_id = common::random_peer_id();
    let packet = announce_packet(connection_id, 0xCAFEBABE, info_hash.0, peer_id.0, 0, 2, 50, 6881);
    let response = UdpServer::handle_packet(remote, &packet, tracker.clone(), cache.clone()).await.unwrap();

    let mut buffer = Vec::new();
    response.write(&mut buffer).unwrap();
    assert_eq!(buffer.len(), 20, "No other peers yet, fixed header only");

    let mut cursor = Cursor::new(buffer.as_slice());
    assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), 1, "action must be announce");
    assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), 0xCAFEBABE);
    assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), 1800, "interval");
    assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), 0, "leechers");
    assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), 1, "seeders");

    let entry = tracker.get_torrent(info_hash).unwrap();
    assert_eq!(entry.seeds.len(), 1, "A seeder was recorded");
    assert_eq!(entry.seeds.get(&peer_id).unwrap().peer_addr, SocketAddr::new(remote.ip(), 6881));
}

#[tokio::test]
async fn test_udp_replay_from_wrong_ip_is_rejected() {
    let tracker = common::create_test_tracker();
    let cache = test_cache();
    let remote = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 40001);
    let attacker = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)), 40002);

    let connection_id = connect(remote, &tracker, &cache, 1).await;
    assert!(!cache.check(ConnectionId(connection_id), attacker.ip()));

    let info_hash = common::random_info_hash();
    let peer_id = common::random_peer_id();
    let packet = announce_packet(connection_id, 0xABAD1DEA, info_hash.0, peer_id.0, 0, 2, 50, 6881);
    let response = UdpServer::handle_packet(attacker, &packet, tracker.clone(), cache.clone()).await.unwrap();

    let mut buffer = Vec::new();
    response.write(&mut buffer).unwrap();

    let mut cursor = Cursor::new(buffer.as_slice());
    assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), 3, "action must be error");
    assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), 0xABAD1DEA, "client transaction id preserved");
    assert_eq!(&buffer[8..], b"Invalid ConnectionID");

    assert!(tracker.get_torrent(info_hash).is_none(), "Rejected announce must not touch the database");
}

#[tokio::test]
async fn test_udp_expired_token_is_rejected() {
    let tracker = common::create_test_tracker();
    let cache = test_cache();
    let remote = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 40001);

    let connection_id = connect(remote, &tracker, &cache, 7).await;

    // age every entry past the ttl
    for shard in cache.shards.iter() {
        for entry in shard.write().values_mut() {
            entry.issued_at -= cache.ttl + 1;
        }
    }

    assert!(!cache.check(ConnectionId(connection_id), remote.ip()));

    let removed = cache.trim();
    assert_eq!(removed, 1);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_udp_validation_can_be_disabled() {
    let cache = Arc::new(ConnectionCache::new(false, 120));
    assert!(cache.check(ConnectionId(0x1BADC0DE), IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7))));
}

#[tokio::test]
async fn test_udp_scrape_triples_in_request_order() {
    let tracker = common::create_test_tracker();
    let cache = test_cache();
    let remote = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 40001);

    let seeded = common::random_info_hash();
    let seed_id = common::random_peer_id();
    tracker.add_torrent_peer(seeded, seed_id, common::create_test_seed(seed_id, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 10)), 6881));

    let leeched = common::random_info_hash();
    for i in 0..2 {
        let peer_id = common::random_peer_id();
        tracker.add_torrent_peer(leeched, peer_id, common::create_test_peer(peer_id, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 20 + i)), 6881));
    }

    let unknown = common::random_info_hash();

    let connection_id = connect(remote, &tracker, &cache, 9).await;
    let mut packet = vec![];
    packet.write_i64::<BigEndian>(connection_id).unwrap();
    packet.write_u32::<BigEndian>(2).unwrap();
    packet.write_u32::<BigEndian>(0xFEEDFACE).unwrap();
    packet.extend_from_slice(&seeded.0);
    packet.extend_from_slice(&leeched.0);
    packet.extend_from_slice(&unknown.0);

    let response = UdpServer::handle_packet(remote, &packet, tracker.clone(), cache.clone()).await.unwrap();
    let mut buffer = Vec::new();
    response.write(&mut buffer).unwrap();

    let mut cursor = Cursor::new(buffer.as_slice());
    assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), 2, "action must be scrape");
    assert_eq!(cursor.read_u32::<BigEndian>().unwrap(), 0xFEEDFACE);

    let triples: Vec<(i32, i32, i32)> = (0..3)
        .map(|_| {
            (
                cursor.read_i32::<BigEndian>().unwrap(),
                cursor.read_i32::<BigEndian>().unwrap(),
                cursor.read_i32::<BigEndian>().unwrap(),
            )
        })
        .collect();
    assert_eq!(triples, vec![(1, -1, 0), (0, -1, 2), (0, -1, 0)]);
}

#[tokio::test]
async fn test_udp_garbage_is_dropped_silently() {
    let tracker = common::create_test_tracker();
    let cache = test_cache();
    let remote = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 40001);

    let response = UdpServer::handle_packet(remote, &[0x13, 0x37], tracker.clone(), cache.clone()).await;
    assert!(response.is_none(), "Truncated packets get no reply");
    assert_eq!(tracker.get_stats().udp4_bad_request, 1);
}

#[tokio::test]
async fn test_udp_announce_numwant_resolution() {
    let tracker = common::create_test_tracker();
    let cache = test_cache();
    let remote = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 40001);

    let info_hash = common::random_info_hash();
    for i in 0..100 {
        let peer_id = common::random_peer_id();
        tracker.add_torrent_peer(info_hash, peer_id, common::create_test_peer(peer_id, IpAddr::V4(Ipv4Addr::new(10, 0, 1, i as u8)), 6881));
    }

    let connection_id = connect(remote, &tracker, &cache, 11).await;
    let peer_id = common::random_peer_id();

    // numwant -1 resolves to the configured default of 75
    let packet = announce_packet(connection_id, 12, info_hash.0, peer_id.0, 500, 2, -1, 6881);
    let response = UdpServer::handle_packet(remote, &packet, tracker.clone(), cache.clone()).await.unwrap();
    let mut buffer = Vec::new();
    response.write(&mut buffer).unwrap();
    assert_eq!((buffer.len() - 20) / 6, 75);

    // explicit numwant below the limit is honored
    let packet = announce_packet(connection_id, 13, info_hash.0, peer_id.0, 500, 2, 10, 6881);
    let response = UdpServer::handle_packet(remote, &packet, tracker.clone(), cache.clone()).await.unwrap();
    let mut buffer = Vec::new();
    response.write(&mut buffer).unwrap();
    assert_eq!((buffer.len() - 20) / 6, 10);
}

#[tokio::test]
async fn test_udp_stopped_announce_removes_peer() {
    let tracker = common::create_test_tracker();
    let cache = test_cache();
    let remote = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 40001);

    let info_hash = common::random_info_hash();
    let peer_id = common::random_peer_id();
    let connection_id = connect(remote, &tracker, &cache, 21).await;

    let packet = announce_packet(connection_id, 22, info_hash.0, peer_id.0, 100, 2, 10, 6881);
    UdpServer::handle_packet(remote, &packet, tracker.clone(), cache.clone()).await.unwrap();
    assert!(tracker.get_torrent(info_hash).is_some());

    let packet = announce_packet(connection_id, 23, info_hash.0, peer_id.0, 100, 3, 10, 6881);
    let response = UdpServer::handle_packet(remote, &packet, tracker.clone(), cache.clone()).await.unwrap();
    let mut buffer = Vec::new();
    response.write(&mut buffer).unwrap();
    assert_eq!(buffer.len(), 20, "Stopped announce returns no peers");
    assert!(tracker.get_torrent(info_hash).is_none());
}
