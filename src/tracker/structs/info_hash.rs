//! BitTorrent info hash identifier.

/// A 20-byte BitTorrent info hash.
///
/// The info hash is the SHA-1 hash of the "info" dictionary in a torrent
/// file and uniquely identifies a swarm. The tracker treats it as opaque
/// bytes; the low bits select the storage shard.
///
/// Displayed and parsed as a 40-character hexadecimal string; serialized
/// the same way.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct InfoHash(pub [u8; 20]);
