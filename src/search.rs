use crate::{
	errors::{ListenError, SearchError},
	message,
	options::Options,
	resolver::AddrResolver,
	socket::{MulticastSocket, ReadEnd},
};
use std::time::Duration;

pub use crate::message::Service;

/// Sends a single `M-SEARCH` for `search_type` and collects every response that arrives within `wait_secs` seconds.
///
/// `local_addr` is the address to search from; an empty string picks any address and port. Responses are
/// returned in the order they arrived, and a service answering more than once is listed more than once.
///
/// A `wait_secs` of zero returns right after the request is sent.
pub fn search(search_type: &str, wait_secs: u32, local_addr: &str, options: &Options) -> Result<Vec<Service>, SearchError> {
	let local = AddrResolver::new(local_addr).resolve().map_err(ListenError::from)?;
	let group = options.remote_resolver().resolve().map_err(ListenError::from)?;
	let socket = MulticastSocket::open(local, group, options.target_interface()?, options.multicast_ttl())?;

	log::debug!("searching for {search_type} from {}", socket.local_addr()?);

	let request = message::build_search(group, search_type, wait_secs);

	tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()?
		.block_on(async move {
			let socket = socket.into_async()?;
			socket.send_to(&request, group.into()).await?;

			let mut services = Vec::new();
			if wait_secs == 0 {
				socket.close();
				return Ok::<_, SearchError>(services);
			}

			let end = socket
				.read_packets(Some(Duration::from_secs(wait_secs.into())), |from, packet| {
					match Service::parse(from, packet) {
						Ok(service) => {
							log::debug!("{} ({}) answered from {from}", service.usn(), service.search_type());
							services.push(service);
						}
						Err(err) => log::debug!("ignoring datagram from {from}: {err}"),
					}
					Ok::<_, SearchError>(())
				})
				.await?;

			match end {
				ReadEnd::TimedOut => log::debug!("search for {search_type} got {} response(s)", services.len()),
				ReadEnd::Closed => log::debug!("search for {search_type} ended early, the socket was closed"),
			}
			socket.close();

			Ok(services)
		})
}
