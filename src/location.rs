use crate::net::Ipv4Interface;
use std::{net::SocketAddr, sync::Arc};

type LocationFn = dyn Fn(Option<SocketAddr>, Option<&Ipv4Interface>) -> String + Send + Sync + 'static;

#[derive(Clone)]
/// The `LOCATION` of an advertised service.
///
/// A location can be [fixed](Location::fixed), or [computed](Location::computed) for every message so that
/// it can point at an address reachable from the network the message is sent to.
pub enum Location {
	Fixed(String),
	Computed(Arc<LocationFn>),
}
impl Location {
	/// The same location for every message.
	pub fn fixed(location: impl Into<String>) -> Self {
		Self::Fixed(location.into())
	}

	/// A location computed for every message.
	///
	/// For responses to `M-SEARCH` requests the function receives the address of the requester.
	/// For `ssdp:alive` announcements it receives the interface the announcement is about to be sent
	/// from, or `None` when the OS picks the interface.
	pub fn computed<F>(location: F) -> Self
	where
		F: Fn(Option<SocketAddr>, Option<&Ipv4Interface>) -> String + Send + Sync + 'static,
	{
		Self::Computed(Arc::new(location))
	}

	pub fn resolve(&self, from: Option<SocketAddr>, iface: Option<&Ipv4Interface>) -> String {
		match self {
			Self::Fixed(location) => location.clone(),
			Self::Computed(location) => location(from, iface),
		}
	}
}
impl Default for Location {
	fn default() -> Self {
		Self::Fixed(String::new())
	}
}
impl From<&str> for Location {
	#[inline(always)]
	fn from(location: &str) -> Self {
		Self::fixed(location)
	}
}
impl From<String> for Location {
	#[inline(always)]
	fn from(location: String) -> Self {
		Self::Fixed(location)
	}
}
impl std::fmt::Debug for Location {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Fixed(location) => f.debug_tuple("Fixed").field(location).finish(),
			Self::Computed(_) => f.write_str("Computed(..)"),
		}
	}
}
