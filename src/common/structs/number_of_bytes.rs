use serde::{Deserialize, Serialize};

/// Byte count reported by a client (uploaded, downloaded or left).
///
/// Kept signed to match the 64-bit fields of the UDP announce layout.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct NumberOfBytes(pub i64);
