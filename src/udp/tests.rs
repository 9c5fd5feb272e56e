use byteorder::{BigEndian, WriteBytesExt};
use crate::udp::enums::request::Request;
use crate::udp::enums::request_parse_error::RequestParseError;
use crate::udp::enums::response::Response;
use crate::udp::structs::connect_response::ConnectResponse;
use crate::udp::structs::connection_id::ConnectionId;
use crate::udp::structs::transaction_id::TransactionId;
use crate::udp::udp::{MAX_SCRAPE_TORRENTS, PROTOCOL_IDENTIFIER};

fn build_announce_packet(connection_id: i64, transaction_id: i32) -> Vec<u8> {
    let mut packet = vec![];
    packet.write_i64::<BigEndian>(connection_id).unwrap();
    packet.write_u32::<BigEndian>(1).unwrap();
    packet.write_i32::<BigEndian>(transaction_id).unwrap();
    packet.extend_from_slice(&[0u8; 20]); // info hash
    packet.extend_from_slice(&[1u8; 20]); // peer id
    packet.write_u64::<BigEndian>(0).unwrap(); // downloaded
    packet.write_u64::<BigEndian>(1000).unwrap(); // left
    packet.write_u64::<BigEndian>(0).unwrap(); // uploaded
    packet.write_u32::<BigEndian>(0).unwrap(); // event
    packet.write_u32::<BigEndian>(0).unwrap(); // ip
    packet.write_u32::<BigEndian>(0).unwrap(); // key
    packet.write_i32::<BigEndian>(-1).unwrap(); // numwant
    packet.write_u16::<BigEndian>(6881).unwrap(); // port
    packet
}

#[test]
fn test_connect_request_parsing() {
    let mut packet = vec![];
    packet.write_i64::<BigEndian>(PROTOCOL_IDENTIFIER).unwrap();
    packet.write_u32::<BigEndian>(0).unwrap();
    packet.write_u32::<BigEndian>(12345).unwrap();

    match Request::from_bytes(&packet, MAX_SCRAPE_TORRENTS).unwrap() {
        Request::Connect(connect_request) => {
            assert_eq!(connect_request.transaction_id.0, 12345);
        }
        other => panic!("expected connect request, got {other:?}"),
    }
}

#[test]
fn test_connect_without_protocol_identifier_is_unsendable() {
    let mut packet = vec![];
    packet.write_i64::<BigEndian>(0x1234).unwrap();
    packet.write_u32::<BigEndian>(0).unwrap();
    packet.write_u32::<BigEndian>(12345).unwrap();

    match Request::from_bytes(&packet, MAX_SCRAPE_TORRENTS) {
        Err(RequestParseError::Unsendable { .. }) => {}
        other => panic!("expected unsendable error, got {other:?}"),
    }
}

#[test]
fn test_truncated_packet_is_unsendable() {
    let packet = vec![1, 2, 3];
    assert!(matches!(
        Request::from_bytes(&packet, MAX_SCRAPE_TORRENTS),
        Err(RequestParseError::Unsendable { .. })
    ));
}

#[test]
fn test_announce_request_parsing() {
    let packet = build_announce_packet(99, 54321);

    match Request::from_bytes(&packet, MAX_SCRAPE_TORRENTS).unwrap() {
        Request::Announce(announce_request) => {
            assert_eq!(announce_request.connection_id.0, 99);
            assert_eq!(announce_request.transaction_id.0, 54321);
            assert_eq!(announce_request.port.0, 6881);
            assert_eq!(announce_request.peers_wanted.0, -1);
            assert_eq!(announce_request.bytes_left.0, 1000);
            assert!(announce_request.ip_address.is_none());
        }
        other => panic!("expected announce request, got {other:?}"),
    }
}

#[test]
fn test_truncated_announce_is_sendable() {
    let packet = build_announce_packet(99, 54321);

    match Request::from_bytes(&packet[..40], MAX_SCRAPE_TORRENTS) {
        Err(RequestParseError::Sendable { transaction_id, .. }) => {
            assert_eq!(transaction_id.0, 54321);
        }
        other => panic!("expected sendable error, got {other:?}"),
    }
}

#[test]
fn test_scrape_request_parsing() {
    let mut packet = vec![];
    packet.write_i64::<BigEndian>(99).unwrap();
    packet.write_u32::<BigEndian>(2).unwrap();
    packet.write_i32::<BigEndian>(777).unwrap();
    packet.extend_from_slice(&[2u8; 20]);
    packet.extend_from_slice(&[3u8; 20]);

    match Request::from_bytes(&packet, MAX_SCRAPE_TORRENTS).unwrap() {
        Request::Scrape(scrape_request) => {
            assert_eq!(scrape_request.transaction_id.0, 777);
            assert_eq!(scrape_request.info_hashes.len(), 2);
            assert_eq!(scrape_request.info_hashes[0].0, [2u8; 20]);
        }
        other => panic!("expected scrape request, got {other:?}"),
    }
}

#[test]
fn test_empty_scrape_is_rejected() {
    let mut packet = vec![];
    packet.write_i64::<BigEndian>(99).unwrap();
    packet.write_u32::<BigEndian>(2).unwrap();
    packet.write_i32::<BigEndian>(777).unwrap();

    match Request::from_bytes(&packet, MAX_SCRAPE_TORRENTS) {
        Err(RequestParseError::Sendable { err: either::Either::Right(message), .. }) => {
            assert_eq!(message, "Full scrapes are not allowed");
        }
        other => panic!("expected sendable error, got {other:?}"),
    }
}

#[test]
fn test_oversize_scrape_is_rejected() {
    let mut packet = vec![];
    packet.write_i64::<BigEndian>(99).unwrap();
    packet.write_u32::<BigEndian>(2).unwrap();
    packet.write_i32::<BigEndian>(777).unwrap();
    for _ in 0..75 {
        packet.extend_from_slice(&[9u8; 20]);
    }

    match Request::from_bytes(&packet, MAX_SCRAPE_TORRENTS) {
        Err(RequestParseError::Sendable { transaction_id, err: either::Either::Right(message), .. }) => {
            assert_eq!(transaction_id.0, 777);
            assert_eq!(message, "too many info_hashes");
        }
        other => panic!("expected sendable error, got {other:?}"),
    }
}

#[test]
fn test_unknown_action_is_sendable() {
    let mut packet = vec![];
    packet.write_i64::<BigEndian>(99).unwrap();
    packet.write_u32::<BigEndian>(9).unwrap();
    packet.write_i32::<BigEndian>(555).unwrap();

    assert!(matches!(
        Request::from_bytes(&packet, MAX_SCRAPE_TORRENTS),
        Err(RequestParseError::Sendable { .. })
    ));
}

#[test]
fn test_connect_response_layout() {
    let response = Response::Connect(ConnectResponse {
        transaction_id: TransactionId(0x0DEADBEE),
        connection_id: ConnectionId(0x1122334455667788),
    });

    let mut buffer = Vec::new();
    response.write(&mut buffer).unwrap();

    assert_eq!(buffer.len(), 16);
    assert_eq!(&buffer[0..4], &0u32.to_be_bytes());
    assert_eq!(&buffer[4..8], &0x0DEADBEEu32.to_be_bytes());
    assert_eq!(&buffer[8..16], &0x1122334455667788u64.to_be_bytes());
}

#[test]
fn test_request_write_round_trip() {
    let packet = build_announce_packet(42, 4242);
    let parsed = Request::from_bytes(&packet, MAX_SCRAPE_TORRENTS).unwrap();

    let mut rewritten = Vec::new();
    parsed.write(&mut rewritten).unwrap();
    assert_eq!(rewritten, packet);
}
