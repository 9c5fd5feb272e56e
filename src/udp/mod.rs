//! UDP tracker protocol implementation (BEP-15).
//!
//! The protocol is connection-oriented over datagrams: a client first sends
//! a connect request and receives a connection id, then uses that id for
//! announce and scrape requests. Connection ids are random 64-bit tokens
//! bound to the requester's source address and a short lifetime; they are
//! what keeps the tracker from being abused as an amplification reflector
//! against spoofed source addresses.
//!
//! All wire integers are big-endian. Malformed datagrams are dropped
//! without an answer; client-facing problems (bad connection id, oversized
//! scrape) get an action=3 error packet with the transaction id preserved.

/// Enumerations for UDP protocol actions and errors.
pub mod enums;

/// Implementation blocks for UDP packet handling.
pub mod impls;

/// Data structures for UDP protocol messages.
pub mod structs;

/// Constants and the UDP service entry point.
#[allow(clippy::module_inception)]
pub mod udp;

#[cfg(test)]
mod tests;
