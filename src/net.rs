//! Networking utilities and abstractions

use crate::errors::ListenError;
use std::net::{IpAddr, Ipv4Addr};

/// The [`if_addrs`](https://crates.io/crates/if_addrs) crate is used to discover network interfaces on the system.
///
/// Here is a re-export for your convenience.
pub use if_addrs;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// An IPv4 network interface that can join a multicast group.
///
/// With IPv4, an interface is identified by one of its addresses when joining a group or
/// selecting the outgoing interface for multicast packets.
pub struct Ipv4Interface {
	/// The name of the interface, e.g. `eth0`.
	pub name: String,

	/// An IPv4 address assigned to the interface.
	pub addr: Ipv4Addr,
}
impl Ipv4Interface {
	#[inline(always)]
	pub fn new(name: impl Into<String>, addr: Ipv4Addr) -> Self {
		Self { name: name.into(), addr }
	}

	/// Lists the interfaces that are usable for SSDP: interfaces that are up and have at least one
	/// specified IPv4 address.
	///
	/// Interfaces are returned in the order the system reports them, once per interface name, using
	/// the first IPv4 address found for each.
	pub fn enumerate() -> Result<Vec<Self>, std::io::Error> {
		let up = crate::util::ifaces_up()?;

		let mut ifaces: Vec<Self> = Vec::new();
		for iface in if_addrs::get_if_addrs()? {
			let addr = match iface.ip() {
				IpAddr::V4(addr) if !addr.is_unspecified() => addr,
				_ => continue,
			};

			if !up.contains(&iface.name) || ifaces.iter().any(|known| known.name == iface.name) {
				continue;
			}

			ifaces.push(Self { name: iface.name, addr });
		}

		Ok(ifaces)
	}

	/// Looks up usable interfaces by name, as listed by [`enumerate`](Ipv4Interface::enumerate).
	///
	/// Fails with [`ListenError::UnknownInterfaces`] if any of `names` is not a usable interface.
	pub fn find_by_name<S: AsRef<str>>(names: &[S]) -> Result<Vec<Self>, ListenError> {
		select_by_name(Self::enumerate()?, names)
	}
}

impl std::fmt::Display for Ipv4Interface {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} ({})", self.name, self.addr)
	}
}

/// Picks the interfaces called one of `names` out of `ifaces`, keeping the order of `ifaces`.
pub(crate) fn select_by_name<S: AsRef<str>>(ifaces: Vec<Ipv4Interface>, names: &[S]) -> Result<Vec<Ipv4Interface>, ListenError> {
	let unknown = names
		.iter()
		.map(|name| name.as_ref())
		.filter(|name| !ifaces.iter().any(|iface| iface.name == *name))
		.map(str::to_owned)
		.collect::<Vec<_>>();

	if !unknown.is_empty() {
		return Err(ListenError::UnknownInterfaces(unknown));
	}

	Ok(ifaces
		.into_iter()
		.filter(|iface| names.iter().any(|name| name.as_ref() == iface.name))
		.collect())
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The interfaces a multicast socket joins the group on.
pub(crate) enum TargetInterface {
	/// Let the OS decide which interface to use.
	Default,

	/// Use the given interfaces.
	Multi(Vec<Ipv4Interface>),
}

pub(crate) trait MulticastSocketEx<Iface> {
	fn set_multicast_if(&self, iface: Iface) -> Result<(), std::io::Error>;
}

impl MulticastSocketEx<Ipv4Addr> for tokio::net::UdpSocket {
	#[inline(always)]
	fn set_multicast_if(&self, iface: Ipv4Addr) -> Result<(), std::io::Error> {
		socket2::SockRef::from(self).set_multicast_if_v4(&iface)
	}
}
