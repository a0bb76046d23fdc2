#![cfg_attr(docsrs, feature(doc_cfg))]

use std::net::{Ipv4Addr, SocketAddrV4};

#[macro_use]
extern crate thiserror;

mod socket;
mod util;

pub mod errors;
pub mod location;
pub mod message;
pub mod net;
pub mod options;
pub mod resolver;

mod announce;
pub use announce::{announce_alive, announce_bye};

#[cfg(feature = "advertise")]
#[cfg_attr(docsrs, doc(cfg(feature = "advertise")))]
pub mod advertise;

#[cfg(feature = "monitor")]
#[cfg_attr(docsrs, doc(cfg(feature = "monitor")))]
pub mod monitor;

#[cfg(feature = "search")]
#[cfg_attr(docsrs, doc(cfg(feature = "search")))]
pub mod search;

pub use location::Location;
pub use options::Options;

pub const SSDP_PORT: u16 = 1900;
pub const SSDP_V4_IP: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);
pub const SSDP_V4_ADDR: SocketAddrV4 = SocketAddrV4::new(SSDP_V4_IP, SSDP_PORT);

/// Default address that advertisers and monitors listen on.
///
/// Multicast local addresses are bound as the wildcard address on the same port.
pub const DEFAULT_LOCAL_ADDR: &str = "224.0.0.1:1900";

/// Default group address that messages are sent to.
pub const DEFAULT_REMOTE_ADDR: &str = "239.255.255.250:1900";

/// Search type that matches every advertiser.
pub const ALL: &str = "ssdp:all";

/// Search type that matches every root device.
pub const ROOT_DEVICE: &str = "upnp:rootdevice";

#[cfg(test)]
mod tests;
