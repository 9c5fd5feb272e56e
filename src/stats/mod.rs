//! Statistics tracking.
//!
//! Collects real-time counters for tracker activity: live torrent/seed/peer
//! totals and per-protocol, per-family request counters. All counters are
//! atomics and safe to update from any task.

/// Statistics event types.
pub mod enums;

/// Implementation blocks for statistics updates.
pub mod impls;

/// Statistics data structures.
pub mod structs;
