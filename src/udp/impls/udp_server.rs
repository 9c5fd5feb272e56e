use log::{debug, info};
use std::io::Cursor;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::UdpSocket;
use crate::stats::enums::stats_event::StatsEvent;
use crate::tracker::enums::announce_event::AnnounceEvent;
use crate::tracker::enums::torrent_peers_type::TorrentPeersType;
use crate::tracker::structs::announce_query_request::AnnounceQueryRequest;
use crate::tracker::structs::torrent_tracker::TorrentTracker;
use crate::udp::enums::request::Request;
use crate::udp::enums::request_parse_error::RequestParseError;
use crate::udp::enums::response::Response;
use crate::udp::enums::server_error::ServerError;
use crate::udp::structs::announce_interval::AnnounceInterval;
use crate::udp::structs::announce_request::AnnounceRequest;
use crate::udp::structs::announce_response::AnnounceResponse;
use crate::udp::structs::connect_request::ConnectRequest;
use crate::udp::structs::connect_response::ConnectResponse;
use crate::udp::structs::connection_cache::ConnectionCache;
use crate::udp::structs::error_response::ErrorResponse;
use crate::udp::structs::number_of_downloads::NumberOfDownloads;
use crate::udp::structs::number_of_peers::NumberOfPeers;
use crate::udp::structs::port::Port;
use crate::udp::structs::response_peer::ResponsePeer;
use crate::udp::structs::scrape_request::ScrapeRequest;
use crate::udp::structs::scrape_response::ScrapeResponse;
use crate::udp::structs::torrent_scrape_statistics::TorrentScrapeStatistics;
use crate::udp::structs::transaction_id::TransactionId;
use crate::udp::structs::udp_server::UdpServer;
use crate::udp::udp::{MAX_PACKET_SIZE, MAX_SCRAPE_TORRENTS};

impl UdpServer {
    pub async fn new(tracker: Arc<TorrentTracker>, connection_cache: Arc<ConnectionCache>, bind_address: SocketAddr) -> tokio::io::Result<UdpServer> {
        let socket = UdpSocket::bind(bind_address).await?;

        Ok(UdpServer {
            socket: Arc::new(socket),
            tracker,
            connection_cache,
        })
    }

    pub async fn start(&self, rx: tokio::sync::watch::Receiver<bool>) {
        let mut rx = rx.clone();
        let mut data = [0; MAX_PACKET_SIZE];
        let udp_sock = self.socket.local_addr().unwrap();

        loop {
            tokio::select! {
                _ = rx.changed() => {
                    info!("Stopping UDP server: {udp_sock}...");
                    break;
                }
                Ok((valid_bytes, remote_addr)) = self.socket.recv_from(&mut data) => {
                    let payload = data[..valid_bytes].to_vec();

                    debug!("Received {} bytes from {}", payload.len(), remote_addr);

                    let tracker = self.tracker.clone();
                    let connection_cache = self.connection_cache.clone();
                    let socket = self.socket.clone();
                    tokio::spawn(async move {
                        if let Some(response) = UdpServer::handle_packet(remote_addr, &payload, tracker, connection_cache).await {
                            UdpServer::send_response(socket, remote_addr, response).await;
                        }
                    });
                }
            }
        }
    }

    pub async fn send_response(socket: Arc<UdpSocket>, remote_addr: SocketAddr, response: Response) {
        debug!("sending response to: {:?}", &remote_addr);

        let buffer = vec![0u8; MAX_PACKET_SIZE];
        let mut cursor = Cursor::new(buffer);

        match response.write(&mut cursor) {
            Ok(()) => {
                let position = cursor.position() as usize;
                let inner = cursor.get_ref();
                UdpServer::send_packet(socket, &remote_addr, &inner[..position]).await;
            }
            Err(error) => {
                debug!("could not write response to bytes: {error}");
            }
        }
    }

    pub async fn send_packet(socket: Arc<UdpSocket>, remote_addr: &SocketAddr, payload: &[u8]) {
        // doesn't matter if it reaches or not
        let _ = socket.send_to(payload, remote_addr).await;
    }

    /// Dispatches one datagram.
    ///
    /// Returns `None` for garbage that cannot be answered: truncated or
    /// unparseable packets are dropped without a reply so the socket never
    /// amplifies random traffic.
    pub async fn handle_packet(remote_addr: SocketAddr, payload: &[u8], tracker: Arc<TorrentTracker>, connection_cache: Arc<ConnectionCache>) -> Option<Response> {
        match Request::from_bytes(payload, MAX_SCRAPE_TORRENTS) {
            Ok(request) => {
                let transaction_id = match &request {
                    Request::Connect(connect_request) => connect_request.transaction_id,
                    Request::Announce(announce_request) => announce_request.transaction_id,
                    Request::Scrape(scrape_request) => scrape_request.transaction_id,
                };

                match UdpServer::handle_request(request, remote_addr, tracker, connection_cache).await {
                    Ok(response) => Some(response),
                    Err(e) => Some(UdpServer::handle_udp_error(e, transaction_id)),
                }
            }
            Err(RequestParseError::Sendable { transaction_id, err: either::Either::Right(message), .. }) => {
                match remote_addr {
                    SocketAddr::V4(_) => { tracker.update_stats(StatsEvent::Udp4BadRequest, 1); }
                    SocketAddr::V6(_) => { tracker.update_stats(StatsEvent::Udp6BadRequest, 1); }
                }
                Some(Response::from(ErrorResponse {
                    transaction_id,
                    message: message.into(),
                }))
            }
            Err(_) => {
                match remote_addr {
                    SocketAddr::V4(_) => { tracker.update_stats(StatsEvent::Udp4BadRequest, 1); }
                    SocketAddr::V6(_) => { tracker.update_stats(StatsEvent::Udp6BadRequest, 1); }
                }
                None
            }
        }
    }

    pub async fn handle_request(request: Request, remote_addr: SocketAddr, tracker: Arc<TorrentTracker>, connection_cache: Arc<ConnectionCache>) -> Result<Response, ServerError> {
        match request {
            Request::Connect(connect_request) => {
                UdpServer::handle_udp_connect(remote_addr, &connect_request, tracker, connection_cache).await
            }
            Request::Announce(announce_request) => {
                if !connection_cache.check(announce_request.connection_id, remote_addr.ip()) {
                    UdpServer::count_invalid_request(&tracker, &remote_addr);
                    return Err(ServerError::InvalidConnectionId);
                }
                UdpServer::handle_udp_announce(remote_addr, &announce_request, tracker).await
            }
            Request::Scrape(scrape_request) => {
                if !connection_cache.check(scrape_request.connection_id, remote_addr.ip()) {
                    UdpServer::count_invalid_request(&tracker, &remote_addr);
                    return Err(ServerError::InvalidConnectionId);
                }
                UdpServer::handle_udp_scrape(remote_addr, &scrape_request, tracker).await
            }
        }
    }

    fn count_invalid_request(tracker: &Arc<TorrentTracker>, remote_addr: &SocketAddr) {
        match remote_addr {
            SocketAddr::V4(_) => { tracker.update_stats(StatsEvent::Udp4InvalidRequest, 1); }
            SocketAddr::V6(_) => { tracker.update_stats(StatsEvent::Udp6InvalidRequest, 1); }
        }
    }

    pub async fn handle_udp_connect(remote_addr: SocketAddr, request: &ConnectRequest, tracker: Arc<TorrentTracker>, connection_cache: Arc<ConnectionCache>) -> Result<Response, ServerError> {
        let connection_id = connection_cache.issue(remote_addr.ip());

        let response = Response::from(ConnectResponse {
            transaction_id: request.transaction_id,
            connection_id,
        });

        let stats_event = if remote_addr.is_ipv4() {
            StatsEvent::Udp4ConnectionsHandled
        } else {
            StatsEvent::Udp6ConnectionsHandled
        };
        tracker.update_stats(stats_event, 1);

        Ok(response)
    }

    pub async fn handle_udp_announce(remote_addr: SocketAddr, request: &AnnounceRequest, tracker: Arc<TorrentTracker>) -> Result<Response, ServerError> {
        let config = &tracker.config.tracker_config;

        if request.port.0 == 0 {
            return Err(ServerError::BadRequest);
        }

        // ip override only exists in the IPv4 layout
        let effective_remote_addr = match (request.ip_address, remote_addr.ip()) {
            (Some(payload_ip), IpAddr::V4(_)) => SocketAddr::new(IpAddr::V4(payload_ip), remote_addr.port()),
            _ => remote_addr,
        };

        let numwant = if request.peers_wanted.0 <= 0 {
            config.numwant_default
        } else {
            (request.peers_wanted.0 as u64).min(config.numwant_limit)
        };

        let announce_query = AnnounceQueryRequest {
            info_hash: request.info_hash,
            peer_id: request.peer_id,
            port: request.port.0,
            uploaded: request.bytes_uploaded.0.max(0) as u64,
            downloaded: request.bytes_downloaded.0.max(0) as u64,
            left: request.bytes_left.0.max(0) as u64,
            compact: true,
            no_peer_id: false,
            event: request.event,
            remote_addr: effective_remote_addr.ip(),
            numwant,
        };

        let (_, torrent_entry) = match tracker.handle_announce(announce_query) {
            Ok(result) => result,
            Err(error) => {
                debug!("[UDP ERROR] Handle Announce: {error}");
                return Err(ServerError::InternalServerError);
            }
        };

        let family = if remote_addr.is_ipv4() { TorrentPeersType::IPv4 } else { TorrentPeersType::IPv6 };
        let sampled = if request.event == AnnounceEvent::Stopped {
            Vec::new()
        } else {
            tracker.sample_torrent_peers(
                request.info_hash,
                numwant as usize,
                Some(request.peer_id),
                family,
                request.bytes_left.0 == 0,
            )
        };

        let request_interval = config.announce_interval as i32;
        let leechers = torrent_entry.peers.len() as i32;
        let seeders = torrent_entry.seeds.len() as i32;

        let response = if remote_addr.is_ipv4() {
            Response::from(AnnounceResponse {
                transaction_id: request.transaction_id,
                announce_interval: AnnounceInterval(request_interval),
                leechers: NumberOfPeers(leechers),
                seeders: NumberOfPeers(seeders),
                peers: sampled.iter()
                    .filter_map(|(_, peer_addr)| match peer_addr.ip() {
                        IpAddr::V4(ip) => Some(ResponsePeer::<Ipv4Addr> { ip_address: ip, port: Port(peer_addr.port()) }),
                        IpAddr::V6(_) => None,
                    })
                    .collect(),
            })
        } else {
            Response::from(AnnounceResponse {
                transaction_id: request.transaction_id,
                announce_interval: AnnounceInterval(request_interval),
                leechers: NumberOfPeers(leechers),
                seeders: NumberOfPeers(seeders),
                peers: sampled.iter()
                    .filter_map(|(_, peer_addr)| match peer_addr.ip() {
                        IpAddr::V6(ip) => Some(ResponsePeer::<Ipv6Addr> { ip_address: ip, port: Port(peer_addr.port()) }),
                        IpAddr::V4(_) => None,
                    })
                    .collect(),
            })
        };

        let stats_event = if remote_addr.is_ipv4() {
            StatsEvent::Udp4AnnouncesHandled
        } else {
            StatsEvent::Udp6AnnouncesHandled
        };
        tracker.update_stats(stats_event, 1);

        Ok(response)
    }

    pub async fn handle_udp_scrape(remote_addr: SocketAddr, request: &ScrapeRequest, tracker: Arc<TorrentTracker>) -> Result<Response, ServerError> {
        let mut torrent_stats = Vec::with_capacity(request.info_hashes.len());
        for info_hash in &request.info_hashes {
            let scrape_entry = match tracker.get_torrent(*info_hash) {
                Some(torrent_entry) => TorrentScrapeStatistics {
                    seeders: NumberOfPeers(torrent_entry.seeds.len() as i32),
                    completed: NumberOfDownloads(-1),
                    leechers: NumberOfPeers(torrent_entry.peers.len() as i32),
                },
                None => TorrentScrapeStatistics {
                    seeders: NumberOfPeers(0),
                    completed: NumberOfDownloads(-1),
                    leechers: NumberOfPeers(0),
                },
            };
            torrent_stats.push(scrape_entry);
        }

        let stats_event = if remote_addr.is_ipv4() {
            StatsEvent::Udp4ScrapesHandled
        } else {
            StatsEvent::Udp6ScrapesHandled
        };
        tracker.update_stats(stats_event, 1);

        Ok(Response::from(ScrapeResponse {
            transaction_id: request.transaction_id,
            torrent_stats,
        }))
    }

    pub fn handle_udp_error(e: ServerError, transaction_id: TransactionId) -> Response {
        Response::from(ErrorResponse {
            transaction_id,
            message: e.to_string().into(),
        })
    }
}
