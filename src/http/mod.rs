//! HTTP tracker protocol implementation (BEP-3, BEP-23, BEP-48).
//!
//! Serves `GET /announce` and `GET /scrape`. Responses are bencoded with
//! HTTP status 200 even on tracker-level failures; per BitTorrent
//! convention the transport status is independent of the tracker status,
//! and failures are reported through a `failure reason` dictionary key.

#[allow(clippy::module_inception)]
pub mod http;

/// Type aliases for the HTTP service plumbing.
pub mod types;
