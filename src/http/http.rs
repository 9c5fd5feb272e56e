use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use actix_cors::Cors;
use actix_web::{http, web, App, HttpRequest, HttpResponse, HttpServer};
use actix_web::dev::ServerHandle;
use actix_web::http::header::ContentType;
use actix_web::http::KeepAlive;
use actix_web::web::{Data, ServiceConfig};
use log::{debug, info};
use crate::bencode::bencode::Bencode;
use crate::common::common::parse_query;
use crate::config::structs::http_trackers_config::HttpTrackersConfig;
use crate::http::types::{HttpServiceQueryHashingMapErr, HttpServiceQueryHashingMapOk};
use crate::stats::enums::stats_event::StatsEvent;
use crate::tracker::enums::announce_event::AnnounceEvent;
use crate::tracker::enums::torrent_peers_type::TorrentPeersType;
use crate::tracker::structs::torrent_tracker::TorrentTracker;
use crate::{ben_bytes, ben_int, ben_list, ben_map};

pub fn http_service_cors() -> Cors {
    Cors::default()
        .send_wildcard()
        .allowed_methods(vec!["GET"])
        .allowed_headers(vec![http::header::X_FORWARDED_FOR, http::header::ACCEPT])
        .allowed_header(http::header::CONTENT_TYPE)
        .max_age(1)
}

pub fn http_service_routes(data: Arc<TorrentTracker>) -> Box<dyn Fn(&mut ServiceConfig)> {
    Box::new(move |cfg: &mut ServiceConfig| {
        cfg.app_data(web::Data::new(data.clone()));
        cfg.service(web::resource("/announce").route(web::get().to(http_service_announce)));
        cfg.service(web::resource("/scrape").route(web::get().to(http_service_scrape)));
        cfg.default_service(web::route().to(http_service_not_found));
    })
}

pub async fn http_service(
    addr: SocketAddr,
    data: Arc<TorrentTracker>,
    http_config: HttpTrackersConfig,
) -> (ServerHandle, impl Future<Output = Result<(), std::io::Error>>) {
    info!("[HTTP] Starting server listener on {addr}");

    let keep_alive = if http_config.keep_alive == 0 {
        KeepAlive::Disabled
    } else {
        KeepAlive::Timeout(Duration::from_secs(http_config.keep_alive))
    };

    let server = HttpServer::new(move || {
        App::new()
            .wrap(http_service_cors())
            .configure(http_service_routes(data.clone()))
    })
        .keep_alive(keep_alive)
        .client_request_timeout(Duration::from_secs(http_config.request_timeout))
        .client_disconnect_timeout(Duration::from_secs(http_config.disconnect_timeout))
        .workers(http_config.threads as usize)
        .bind((addr.ip(), addr.port()))
        .unwrap_or_else(|e| {
            panic!("[HTTP] Unable to bind {addr}: {e}");
        })
        .disable_signals()
        .run();

    (server.handle(), server)
}

fn bencoded_failure(message: &str) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::plaintext()).body(ben_map! {
        "failure reason" => ben_bytes!(message)
    }.encode())
}

fn http_validate_ip(request: &HttpRequest) -> Result<IpAddr, HttpResponse> {
    match request.peer_addr() {
        Some(remote_addr) => Ok(remote_addr.ip()),
        None => Err(bencoded_failure("could not find remote address")),
    }
}

fn http_service_query_hashing(query_map_result: Result<HttpServiceQueryHashingMapOk, crate::common::structs::custom_error::CustomError>) -> Result<HttpServiceQueryHashingMapOk, HttpServiceQueryHashingMapErr> {
    match query_map_result {
        Ok(result) => Ok(result),
        Err(error) => Err(bencoded_failure(&error.to_string())),
    }
}

pub async fn http_service_announce(request: HttpRequest, data: Data<Arc<TorrentTracker>>) -> HttpResponse {
    let ip = match http_validate_ip(&request) {
        Ok(ip) => ip,
        Err(response) => {
            data.update_stats(StatsEvent::Tcp4Failure, 1);
            return response;
        }
    };

    if ip.is_ipv4() {
        data.update_stats(StatsEvent::Tcp4AnnouncesHandled, 1);
    } else {
        data.update_stats(StatsEvent::Tcp6AnnouncesHandled, 1);
    }

    http_service_announce_handler(request, ip, data.as_ref().clone()).await
}

pub async fn http_service_announce_handler(request: HttpRequest, ip: IpAddr, data: Arc<TorrentTracker>) -> HttpResponse {
    let query_map_result = parse_query(Some(request.query_string().to_string()));
    let query_map = match http_service_query_hashing(query_map_result) {
        Ok(result) => result,
        Err(response) => { return response; }
    };

    let announce = match data.validate_announce(ip, query_map) {
        Ok(result) => result,
        Err(error) => {
            debug!("[HTTP ANNOUNCE] Rejected: {error}");
            return bencoded_failure(&error.to_string());
        }
    };

    let torrent_entry = match data.handle_announce(announce.clone()) {
        Ok((_, torrent_entry)) => torrent_entry,
        Err(error) => {
            return bencoded_failure(&error.to_string());
        }
    };

    let config = &data.config.tracker_config;
    let sampled = if announce.event == AnnounceEvent::Stopped {
        Vec::new()
    } else {
        data.sample_torrent_peers(
            announce.info_hash,
            announce.numwant as usize,
            Some(announce.peer_id),
            TorrentPeersType::All,
            announce.left == 0,
        )
    };

    if announce.compact {
        let mut peers: Vec<u8> = Vec::with_capacity(sampled.len() * 6);
        let mut peers6: Vec<u8> = Vec::new();
        for (_, peer_addr) in sampled.iter() {
            match peer_addr.ip() {
                IpAddr::V4(peer_ip) => {
                    peers.extend_from_slice(&peer_ip.octets());
                    peers.extend_from_slice(&peer_addr.port().to_be_bytes());
                }
                IpAddr::V6(peer_ip) => {
                    peers6.extend_from_slice(&peer_ip.octets());
                    peers6.extend_from_slice(&peer_addr.port().to_be_bytes());
                }
            }
        }

        let mut response = ben_map! {
            "complete" => ben_int!(torrent_entry.seeds.len() as i64),
            "incomplete" => ben_int!(torrent_entry.peers.len() as i64),
            "interval" => ben_int!(config.announce_interval as i64),
            "min interval" => ben_int!(config.announce_interval_minimum as i64),
            "peers" => ben_bytes!(peers)
        };
        if !peers6.is_empty() {
            response.dict_mut().unwrap().insert(b"peers6".to_vec(), ben_bytes!(peers6));
        }
        return HttpResponse::Ok().content_type(ContentType::plaintext()).body(response.encode());
    }

    let mut peers_list = ben_list!();
    let peers_list_mut = peers_list.list_mut().unwrap();
    for (peer_id, peer_addr) in sampled.iter() {
        if announce.no_peer_id {
            peers_list_mut.push(ben_map! {
                "ip" => ben_bytes!(peer_addr.ip().to_string()),
                "port" => ben_int!(peer_addr.port() as i64)
            });
        } else {
            peers_list_mut.push(ben_map! {
                "ip" => ben_bytes!(peer_addr.ip().to_string()),
                "peer id" => ben_bytes!(peer_id.0.to_vec()),
                "port" => ben_int!(peer_addr.port() as i64)
            });
        }
    }

    HttpResponse::Ok().content_type(ContentType::plaintext()).body(ben_map! {
        "complete" => ben_int!(torrent_entry.seeds.len() as i64),
        "incomplete" => ben_int!(torrent_entry.peers.len() as i64),
        "interval" => ben_int!(config.announce_interval as i64),
        "min interval" => ben_int!(config.announce_interval_minimum as i64),
        "peers" => peers_list
    }.encode())
}

pub async fn http_service_scrape(request: HttpRequest, data: Data<Arc<TorrentTracker>>) -> HttpResponse {
    let ip = match http_validate_ip(&request) {
        Ok(ip) => ip,
        Err(response) => {
            data.update_stats(StatsEvent::Tcp4Failure, 1);
            return response;
        }
    };

    debug!("[DEBUG] Request from {ip}: Scrape");

    if ip.is_ipv4() {
        data.update_stats(StatsEvent::Tcp4ScrapesHandled, 1);
    } else {
        data.update_stats(StatsEvent::Tcp6ScrapesHandled, 1);
    }

    http_service_scrape_handler(request, data.as_ref().clone()).await
}

pub async fn http_service_scrape_handler(request: HttpRequest, data: Arc<TorrentTracker>) -> HttpResponse {
    let query_map_result = parse_query(Some(request.query_string().to_string()));
    let query_map = match http_service_query_hashing(query_map_result) {
        Ok(result) => result,
        Err(response) => { return response; }
    };

    let scrape = match data.validate_scrape(query_map) {
        Ok(result) => result,
        Err(error) => {
            return bencoded_failure(&error.to_string());
        }
    };

    let data_scrape = data.handle_scrape(scrape);
    let mut scrape_list = Bencode::new_dict();
    let scrape_list_mut = scrape_list.dict_mut().unwrap();
    for (info_hash, torrent_entry) in data_scrape.iter() {
        scrape_list_mut.insert(info_hash.0.to_vec(), ben_map! {
            "complete" => ben_int!(torrent_entry.seeds.len() as i64),
            "downloaded" => ben_int!(0),
            "incomplete" => ben_int!(torrent_entry.peers.len() as i64)
        });
    }

    HttpResponse::Ok().content_type(ContentType::plaintext()).body(ben_map! {
        "files" => scrape_list
    }.encode())
}

pub async fn http_service_not_found(request: HttpRequest, data: Data<Arc<TorrentTracker>>) -> HttpResponse {
    match request.peer_addr().map(|remote_addr| remote_addr.ip()) {
        Some(ip) if ip.is_ipv6() => { data.update_stats(StatsEvent::Tcp6NotFound, 1); }
        _ => { data.update_stats(StatsEvent::Tcp4NotFound, 1); }
    }
    bencoded_failure("unknown request")
}
