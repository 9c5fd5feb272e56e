//! Shared utilities used across all modules.
//!
//! Contains the raw-byte query string parser, hex conversion helpers,
//! logging setup and the shutdown-aware sleep used by the periodic tasks.

#[allow(clippy::module_inception)]
pub mod common;

/// Shared data structures.
pub mod structs;

/// Implementation blocks for shared structs.
pub mod impls;
