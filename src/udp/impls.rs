pub mod connection_cache;
pub mod request;
pub mod response;
pub mod udp_server;
