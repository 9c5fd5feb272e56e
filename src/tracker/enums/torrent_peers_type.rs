/// Which address family a peer sample may contain.
///
/// UDP responses are single-family (the family of the client socket); HTTP
/// compact responses split IPv4 and IPv6 into the `peers`/`peers6` keys.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TorrentPeersType {
    All,
    IPv4,
    IPv6,
}
