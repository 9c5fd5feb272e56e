/// A 20-byte peer identifier chosen by the client.
///
/// Peer ids are advisory: they are not globally unique and carry no
/// authentication weight. Within one swarm the tracker keeps at most one
/// record per peer id.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct PeerId(pub [u8; 20]);
