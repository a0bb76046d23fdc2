use crate::{
	errors::{AnnounceError, ListenError},
	location::Location,
	message,
	net::Ipv4Interface,
	options::Options,
	resolver::AddrResolver,
	socket::{MulticastSocket, Payload},
};
use std::{borrow::Cow, net::SocketAddrV4};

/// An `ssdp:alive` notification, built separately for every interface it is sent from so that a
/// [computed](Location::computed) location can differ per interface.
pub(crate) struct AlivePayload {
	pub(crate) host: SocketAddrV4,
	pub(crate) nt: String,
	pub(crate) usn: String,
	pub(crate) location: Location,
	pub(crate) server: String,
	pub(crate) max_age: u32,
}
impl Payload for AlivePayload {
	fn bytes(&self, iface: Option<&Ipv4Interface>) -> Cow<'_, [u8]> {
		Cow::Owned(message::build_alive(
			self.host,
			&self.nt,
			&self.usn,
			&self.location.resolve(None, iface),
			&self.server,
			self.max_age,
		))
	}
}

/// Sends a single `ssdp:alive` notification to the multicast group.
///
/// `local_addr` is the address to send from; an empty string picks any address and port.
pub fn announce_alive(
	nt: &str,
	usn: &str,
	location: impl Into<Location>,
	server: &str,
	max_age: u32,
	local_addr: &str,
	options: &Options,
) -> Result<(), AnnounceError> {
	let location = location.into();
	announce(local_addr, options, |host| AlivePayload {
		host,
		nt: nt.to_owned(),
		usn: usn.to_owned(),
		location,
		server: server.to_owned(),
		max_age,
	})?;

	log::debug!("sent ssdp:alive for {usn}");

	Ok(())
}

/// Sends a single `ssdp:byebye` notification to the multicast group.
///
/// `local_addr` is the address to send from; an empty string picks any address and port.
pub fn announce_bye(nt: &str, usn: &str, local_addr: &str, options: &Options) -> Result<(), AnnounceError> {
	announce(local_addr, options, |host| message::build_bye(host, nt, usn))?;

	log::debug!("sent ssdp:byebye for {usn}");

	Ok(())
}

fn announce<F, P>(local_addr: &str, options: &Options, payload: F) -> Result<(), AnnounceError>
where
	F: FnOnce(SocketAddrV4) -> P,
	P: Payload,
{
	let local = AddrResolver::new(local_addr).resolve().map_err(ListenError::from)?;
	let group = options.remote_resolver().resolve().map_err(ListenError::from)?;
	let socket = MulticastSocket::open(local, group, options.target_interface()?, options.multicast_ttl())?;
	let payload = payload(group);

	tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()?
		.block_on(async move {
			let socket = socket.into_async()?;
			socket.send_to(&payload, group.into()).await?;
			socket.close();
			Ok::<_, AnnounceError>(())
		})
}
