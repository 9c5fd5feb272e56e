use std::fmt::Debug;
use std::net::{Ipv4Addr, Ipv6Addr};
use crate::udp::structs::port::Port;

pub trait Ip: Clone + Copy + Debug + PartialEq + Eq {}

impl Ip for Ipv4Addr {}
impl Ip for Ipv6Addr {}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ResponsePeer<I: Ip> {
    pub ip_address: I,
    pub port: Port,
}
