pub mod announce_interval;
pub mod announce_request;
pub mod announce_response;
pub mod connect_request;
pub mod connect_response;
pub mod connection_cache;
pub mod connection_entry;
pub mod connection_id;
pub mod error_response;
pub mod number_of_downloads;
pub mod number_of_peers;
pub mod port;
pub mod response_peer;
pub mod scrape_request;
pub mod scrape_response;
pub mod torrent_scrape_statistics;
pub mod transaction_id;
pub mod udp_server;
