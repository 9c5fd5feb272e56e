use std::net::IpAddr;

/// One issued connection id: the address it was handed to and when.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct ConnectionEntry {
    pub remote_ip: IpAddr,
    pub issued_at: u64,
}
