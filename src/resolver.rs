//! Memoized resolution of address strings

use crate::errors::ResolveError;
use std::{
	net::{Ipv4Addr, SocketAddr, SocketAddrV4, ToSocketAddrs},
	sync::{PoisonError, RwLock},
};

struct ResolverState {
	addr: String,
	resolved: Option<SocketAddrV4>,
}

/// Resolves an address string such as `"239.255.255.250:1900"` to an IPv4 socket address.
///
/// The first successful resolution is cached; failures are retried on the next call.
/// [`set_addr`](AddrResolver::set_addr) replaces the address and forces the next
/// [`resolve`](AddrResolver::resolve) to resolve again.
pub struct AddrResolver(RwLock<ResolverState>);
impl AddrResolver {
	pub fn new(addr: impl Into<String>) -> Self {
		Self(RwLock::new(ResolverState {
			addr: addr.into(),
			resolved: None,
		}))
	}

	/// The address string this resolver resolves.
	pub fn addr(&self) -> String {
		self.0.read().unwrap_or_else(PoisonError::into_inner).addr.clone()
	}

	/// Replaces the address string and drops any cached resolution.
	pub fn set_addr(&self, addr: impl Into<String>) {
		let mut state = self.0.write().unwrap_or_else(PoisonError::into_inner);
		state.addr = addr.into();
		state.resolved = None;
	}

	pub fn resolve(&self) -> Result<SocketAddrV4, ResolveError> {
		if let Some(resolved) = self.cached() {
			return Ok(resolved);
		}

		let mut state = self.0.write().unwrap_or_else(PoisonError::into_inner);

		// Another thread may have resolved it while we waited for the write lock
		if let Some(resolved) = state.resolved {
			return Ok(resolved);
		}

		let resolved = resolve_v4(&state.addr)?;
		state.resolved = Some(resolved);
		Ok(resolved)
	}

	#[inline]
	/// The cached result of the last successful [`resolve`](AddrResolver::resolve), if any.
	pub fn cached(&self) -> Option<SocketAddrV4> {
		self.0.read().unwrap_or_else(PoisonError::into_inner).resolved
	}
}
impl std::fmt::Debug for AddrResolver {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("AddrResolver").field(&self.addr()).finish()
	}
}

/// An empty address means "any interface, any port".
fn resolve_v4(addr: &str) -> Result<SocketAddrV4, ResolveError> {
	if addr.is_empty() {
		return Ok(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0));
	}

	addr.to_socket_addrs()
		.map_err(|err| ResolveError::InvalidAddress {
			addr: addr.to_owned(),
			message: err.to_string(),
		})?
		.find_map(|addr| match addr {
			SocketAddr::V4(addr) => Some(addr),
			SocketAddr::V6(_) => None,
		})
		.ok_or_else(|| ResolveError::NoIpv4Address(addr.to_owned()))
}
