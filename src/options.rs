//! Configuration shared by advertisers, monitors, searches and announcements

use crate::{errors::ListenError, net::Ipv4Interface, net::TargetInterface, resolver::AddrResolver, DEFAULT_LOCAL_ADDR, DEFAULT_REMOTE_ADDR};
use std::sync::Arc;

/// A function that lists the interfaces to join the multicast group on.
///
/// If it returns an empty list, the interfaces found by [`Ipv4Interface::enumerate`] are used instead.
pub type InterfacesProvider = Arc<dyn Fn() -> Vec<Ipv4Interface> + Send + Sync + 'static>;

#[derive(Clone)]
/// Options for opening SSDP sockets.
///
/// Clones share their address resolvers, so an address resolved once is reused by everything
/// built from the same options.
pub struct Options {
	local_addr: Arc<AddrResolver>,
	remote_addr: Arc<AddrResolver>,
	ttl: u32,
	only_system_interface: bool,
	interfaces: Option<Vec<Ipv4Interface>>,
	interfaces_provider: Option<InterfacesProvider>,
	advertise_host: bool,
}
impl Options {
	pub fn new() -> Self {
		Self {
			local_addr: Arc::new(AddrResolver::new(DEFAULT_LOCAL_ADDR)),
			remote_addr: Arc::new(AddrResolver::new(DEFAULT_REMOTE_ADDR)),
			ttl: 0,
			only_system_interface: false,
			interfaces: None,
			interfaces_provider: None,
			advertise_host: false,
		}
	}

	/// The address advertisers and monitors listen on.
	///
	/// Defaults to [`DEFAULT_LOCAL_ADDR`].
	pub fn local_addr(mut self, addr: impl Into<String>) -> Self {
		self.local_addr = Arc::new(AddrResolver::new(addr));
		self
	}

	/// The multicast group address messages are sent to.
	///
	/// Defaults to [`DEFAULT_REMOTE_ADDR`].
	pub fn remote_addr(mut self, addr: impl Into<String>) -> Self {
		self.remote_addr = Arc::new(AddrResolver::new(addr));
		self
	}

	/// TTL of outgoing multicast packets. Zero keeps the OS default.
	pub fn ttl(mut self, ttl: u32) -> Self {
		self.ttl = ttl;
		self
	}

	/// Join the group on the interface the OS assigns instead of on every usable interface.
	///
	/// Can't be combined with [`interfaces`](Options::interfaces).
	pub fn only_system_interface(mut self) -> Self {
		self.only_system_interface = true;
		self
	}

	/// Join the group on exactly these interfaces.
	///
	/// An empty list falls back to the usable interfaces of the system.
	/// Can't be combined with [`only_system_interface`](Options::only_system_interface).
	pub fn interfaces(mut self, interfaces: Vec<Ipv4Interface>) -> Self {
		self.interfaces = Some(interfaces);
		self
	}

	pub fn interfaces_provider<F>(mut self, provider: F) -> Self
	where
		F: Fn() -> Vec<Ipv4Interface> + Send + Sync + 'static,
	{
		self.interfaces_provider = Some(Arc::new(provider));
		self
	}

	/// Add a `HOST` header to responses to `M-SEARCH` requests, for clients that insist on one.
	pub fn advertise_host(mut self) -> Self {
		self.advertise_host = true;
		self
	}

	#[inline(always)]
	/// The resolver for the listening address.
	pub fn local_resolver(&self) -> &AddrResolver {
		&self.local_addr
	}

	#[inline(always)]
	/// The resolver for the multicast group address.
	pub fn remote_resolver(&self) -> &AddrResolver {
		&self.remote_addr
	}

	#[inline(always)]
	pub fn multicast_ttl(&self) -> u32 {
		self.ttl
	}

	#[inline(always)]
	pub fn adds_host(&self) -> bool {
		self.advertise_host
	}

	pub(crate) fn target_interface(&self) -> Result<TargetInterface, ListenError> {
		match (&self.interfaces, self.only_system_interface) {
			(Some(_), true) => Err(ListenError::ConflictingInterfaces),

			(Some(interfaces), false) if !interfaces.is_empty() => Ok(TargetInterface::Multi(interfaces.clone())),

			(_, true) => Ok(TargetInterface::Default),

			_ => {
				if let Some(provider) = &self.interfaces_provider {
					let interfaces = provider();
					if !interfaces.is_empty() {
						return Ok(TargetInterface::Multi(interfaces));
					}
				}

				Ok(TargetInterface::Multi(Ipv4Interface::enumerate()?))
			}
		}
	}
}
impl Default for Options {
	fn default() -> Self {
		Self::new()
	}
}
impl std::fmt::Debug for Options {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Options")
			.field("local_addr", &self.local_addr)
			.field("remote_addr", &self.remote_addr)
			.field("ttl", &self.ttl)
			.field("only_system_interface", &self.only_system_interface)
			.field("interfaces", &self.interfaces)
			.field("interfaces_provider", &self.interfaces_provider.is_some())
			.field("advertise_host", &self.advertise_host)
			.finish()
	}
}
