//! Bencoding encoder (BEP-3 wire format for tracker responses).
//!
//! The tracker only ever emits bencoded data; it never consumes it, so this
//! module implements the encoder half of the format only. Dictionaries are
//! stored in a `BTreeMap`, which makes the emitted bytes canonical: keys are
//! always sorted ascending by their raw bytes regardless of insertion order.

/// Bencode value tree and encoding routines.
#[allow(clippy::module_inception)]
pub mod bencode;
