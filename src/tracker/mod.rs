//! Core tracker implementation: the in-memory peer database.
//!
//! Torrents are distributed across a power-of-two number of shards selected
//! by the low bits of the info hash (1024 by default). Each shard is a
//! `RwLock<BTreeMap<InfoHash, TorrentEntry>>`; readers of one shard never
//! block readers of another, and no operation holds more than one shard
//! lock at a time. Seeds and leechers live in separate maps per torrent so
//! `complete`/`incomplete` are plain map lengths.
//!
//! Background maintenance (the expiry sweep and the snapshot writer) walks
//! the shards one at a time and yields between them.

/// Enumerations for tracker operations.
pub mod enums;

/// Implementation blocks for tracker structs.
pub mod impls;

/// Data structures for tracker operations.
pub mod structs;
