use super::{handlers::Handlers, Monitor};
use crate::{
	errors::ListenError,
	message::{AliveMessage, ByeMessage, SearchMessage},
	options::Options,
	socket::MulticastSocket,
};

#[derive(Default)]
pub struct MonitorBuilder {
	handlers: Handlers,
	options: Options,
}
impl MonitorBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Called for every `ssdp:alive` notification.
	pub fn on_alive<F>(mut self, handler: F) -> Self
	where
		F: FnMut(AliveMessage) + Send + 'static,
	{
		self.handlers.alive = Some(Box::new(handler));
		self
	}

	/// Called for every `ssdp:byebye` notification.
	pub fn on_bye<F>(mut self, handler: F) -> Self
	where
		F: FnMut(ByeMessage) + Send + 'static,
	{
		self.handlers.bye = Some(Box::new(handler));
		self
	}

	/// Called for every `M-SEARCH` request sent to the group.
	pub fn on_search<F>(mut self, handler: F) -> Self
	where
		F: FnMut(SearchMessage) + Send + 'static,
	{
		self.handlers.search = Some(Box::new(handler));
		self
	}

	pub fn options(mut self, options: Options) -> Self {
		self.options = options;
		self
	}

	/// Opens the socket and joins the multicast group.
	pub fn build(self) -> Result<Monitor, ListenError> {
		let MonitorBuilder { handlers, options } = self;

		if handlers.is_empty() {
			log::warn!("monitor has no handlers, every message will be dropped");
		}

		let local = options.local_resolver().resolve()?;
		let group = options.remote_resolver().resolve()?;
		let socket = MulticastSocket::open(local, group, options.target_interface()?, options.multicast_ttl())?;

		log::debug!("monitoring group {} on {}", socket.group(), socket.local_addr()?);

		Ok(Monitor { socket, handlers })
	}
}
