use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;
use clap::Parser;
use log::{error, info, warn};
use swarmtrack::common::common::{setup_logging, shutdown_waiting};
use swarmtrack::config::structs::configuration::Configuration;
use swarmtrack::http::http::http_service;
use swarmtrack::structs::Cli;
use swarmtrack::tracker::structs::torrent_tracker::TorrentTracker;
use swarmtrack::udp::structs::connection_cache::ConnectionCache;
use swarmtrack::udp::udp::udp_service;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Cli::parse();

    let config = match Configuration::load_from_file(&args.config, args.create_config) {
        Ok(config) => Arc::new(config),
        Err(error) => {
            eprintln!("Could not load configuration from {}: {}", args.config, error);
            exit(101)
        }
    };

    setup_logging(&config);
    info!("{} - Version: {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    for warning in config.startup_warnings() {
        warn!("Configuration warning: {warning}");
    }

    let tracker = Arc::new(TorrentTracker::new(config.clone()));
    tracker.load_snapshot();

    let connection_cache = Arc::new(ConnectionCache::new(
        config.tracker_config.conn_id_validate,
        config.tracker_config.conn_id_ttl,
    ));

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let mut http_handles = Vec::new();
    for http_server_object in &config.http_server {
        if http_server_object.enabled {
            let address: SocketAddr = parse_bind_address(&http_server_object.bind_address);
            let (handle, server) = http_service(address, tracker.clone(), http_server_object.clone()).await;
            http_handles.push(handle);
            tokio::spawn(server);
        }
    }

    let mut udp_futures = Vec::new();
    for udp_server_object in &config.udp_server {
        if udp_server_object.enabled {
            let address: SocketAddr = parse_bind_address(&udp_server_object.bind_address);
            udp_futures.push(udp_service(address, tracker.clone(), connection_cache.clone(), shutdown_rx.clone()).await);
        }
    }

    let interval_peer_cleanup = config.tracker_config.peers_cleanup_interval;
    let peers_timeout = Duration::from_secs(config.tracker_config.peers_timeout);
    let tracker_cleanup = tracker.clone();
    let rx_cleanup = shutdown_rx.clone();
    tokio::spawn(async move {
        loop {
            if shutdown_waiting(Duration::from_secs(interval_peer_cleanup), rx_cleanup.clone()).await {
                break;
            }
            info!("[PEERS] Checking now for dead peers.");
            tracker_cleanup.clean_peers(peers_timeout, Some(&rx_cleanup)).await;
        }
    });

    if config.peer_db.snapshot_interval > 0 {
        let snapshot_interval = config.peer_db.snapshot_interval;
        let tmp_path = TorrentTracker::snapshot_tmp_path(Path::new(&config.peer_db.snapshot_path));
        let tracker_snapshot = tracker.clone();
        let rx_snapshot = shutdown_rx.clone();
        tokio::spawn(async move {
            loop {
                if shutdown_waiting(Duration::from_secs(snapshot_interval), rx_snapshot.clone()).await {
                    break;
                }
                match tracker_snapshot.save_snapshot(&tmp_path) {
                    Ok(count) => {
                        info!("[SNAPSHOT] Saved {} torrents to {}", count, tmp_path.display());
                    }
                    Err(error) => {
                        error!("[SNAPSHOT] Could not write {}: {}", tmp_path.display(), error);
                    }
                }
            }
        });
    }

    let trim_interval = config.tracker_config.conn_id_trim_interval;
    let connection_cache_trim = connection_cache.clone();
    let rx_trim = shutdown_rx.clone();
    tokio::spawn(async move {
        loop {
            if shutdown_waiting(Duration::from_secs(trim_interval), rx_trim.clone()).await {
                break;
            }
            let removed = connection_cache_trim.trim();
            if removed > 0 {
                info!("[CONNECTIONS] Removed {removed} expired connection ids");
            }
        }
    });

    if config.log_console_interval > 0 {
        let console_interval = config.log_console_interval;
        let tracker_console = tracker.clone();
        let rx_console = shutdown_rx.clone();
        tokio::spawn(async move {
            loop {
                if shutdown_waiting(Duration::from_secs(console_interval), rx_console.clone()).await {
                    break;
                }
                let stats = tracker_console.get_stats();
                info!("[STATS] Torrents: {} - Seeds: {} - Peers: {} - Completed: {}", stats.torrents, stats.seeds, stats.peers, stats.completed);
                info!("[STATS TCP IPv4] Announce: {} - Scrape: {}", stats.tcp4_announces_handled, stats.tcp4_scrapes_handled);
                info!("[STATS TCP IPv6] Announce: {} - Scrape: {}", stats.tcp6_announces_handled, stats.tcp6_scrapes_handled);
                info!("[STATS UDP IPv4] Connect: {} - Announce: {} - Scrape: {}", stats.udp4_connections_handled, stats.udp4_announces_handled, stats.udp4_scrapes_handled);
                info!("[STATS UDP IPv6] Connect: {} - Announce: {} - Scrape: {}", stats.udp6_connections_handled, stats.udp6_announces_handled, stats.udp6_scrapes_handled);
            }
        });
    }

    wait_for_shutdown(tracker.clone()).await;

    info!("Shutdown request received, shutting down...");
    let _ = shutdown_tx.send(true);
    for handle in http_handles {
        handle.stop(true).await;
    }
    let _ = futures::future::join_all(udp_futures).await;

    let snapshot_path = PathBuf::from(&tracker.config.peer_db.snapshot_path);
    match tracker.save_snapshot(&snapshot_path) {
        Ok(count) => {
            info!("[SNAPSHOT] Final snapshot of {} torrents written to {}", count, snapshot_path.display());
        }
        Err(error) => {
            error!("[SNAPSHOT] Could not write final snapshot {}: {}", snapshot_path.display(), error);
        }
    }

    info!("Server shutting down completed");
    Ok(())
}

fn parse_bind_address(bind_address: &str) -> SocketAddr {
    bind_address.parse().unwrap_or_else(|error| {
        error!("Invalid bind address {bind_address}: {error}");
        exit(1);
    })
}

#[cfg(unix)]
async fn wait_for_shutdown(tracker: Arc<TorrentTracker>) {
    use tokio::signal::unix::{signal, SignalKind};
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut sighup = signal(SignalKind::hangup()).expect("failed to install SIGHUP handler");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => { break; }
            _ = sigterm.recv() => { break; }
            _ = sighup.recv() => {
                let tmp_path = TorrentTracker::snapshot_tmp_path(Path::new(&tracker.config.peer_db.snapshot_path));
                match tracker.save_snapshot(&tmp_path) {
                    Ok(count) => {
                        info!("[SNAPSHOT] SIGHUP: saved {} torrents to {}", count, tmp_path.display());
                    }
                    Err(error) => {
                        error!("[SNAPSHOT] SIGHUP: could not write {}: {}", tmp_path.display(), error);
                    }
                }
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown(_tracker: Arc<TorrentTracker>) {
    let _ = tokio::signal::ctrl_c().await;
}
