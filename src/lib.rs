//! # Swarmtrack BitTorrent Tracker
//!
//! A single-node BitTorrent tracker built with Rust, Tokio and Actix-web.
//!
//! ## Overview
//!
//! Swarmtrack coordinates peers participating in BitTorrent swarms. Peers
//! announce themselves over UDP (BEP 15) or HTTP (BEP 3) and receive a
//! sample of the other peers in the same swarm. The tracker stores no file
//! content: it is a rendezvous directory with real-time lifecycle rules,
//! kept entirely in memory and snapshotted to disk across restarts.
//!
//! ## Features
//!
//! - **Multi-Protocol Support**: HTTP and UDP tracker protocols
//! - **Sharded Peer Database**: power-of-two shard count, per-shard locks
//! - **Connection ID Cache**: UDP anti-spoofing handshake with TTL-bound tokens
//! - **Snapshots**: deterministic binary snapshots with crash fallback
//! - **Statistics**: atomic per-protocol counters with periodic console dump
//!
//! ## BEP Compliance
//!
//! - BEP 3: The BitTorrent Protocol Specification
//! - BEP 7: IPv6 Tracker Extension
//! - BEP 15: UDP Tracker Protocol
//! - BEP 23: Tracker Returns Compact Peer Lists
//! - BEP 48: Tracker Protocol Extension: Scrape

/// Bencoding encoder for tracker responses.
pub mod bencode;

/// Shared utilities: query parsing, hex conversion, logging setup and
/// shutdown plumbing.
pub mod common;

/// Configuration management and TOML parsing.
pub mod config;

/// HTTP tracker protocol implementation.
pub mod http;

/// Real-time statistics tracking.
pub mod stats;

/// CLI argument parsing.
pub mod structs;

/// Core tracker logic: the sharded peer database, announce/scrape
/// handling, expiry and snapshots.
pub mod tracker;

/// UDP tracker protocol implementation (BEP 15).
pub mod udp;
