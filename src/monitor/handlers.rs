use crate::message::{self, AliveMessage, ByeMessage, Message, SearchMessage};
use std::net::SocketAddr;

pub(super) type AliveHandler = Box<dyn FnMut(AliveMessage) + Send + 'static>;
pub(super) type ByeHandler = Box<dyn FnMut(ByeMessage) + Send + 'static>;
pub(super) type SearchHandler = Box<dyn FnMut(SearchMessage) + Send + 'static>;

#[derive(Default)]
pub(super) struct Handlers {
	pub(super) alive: Option<AliveHandler>,
	pub(super) bye: Option<ByeHandler>,
	pub(super) search: Option<SearchHandler>,
}
impl Handlers {
	#[inline]
	pub(super) fn is_empty(&self) -> bool {
		self.alive.is_none() && self.bye.is_none() && self.search.is_none()
	}

	/// Parses a datagram and hands it to the matching handler, if one is registered.
	pub(super) fn dispatch(&mut self, from: SocketAddr, packet: &[u8]) {
		let message = match message::parse(from, packet) {
			Ok(message) => message,
			Err(err) => {
				log::debug!("ignoring datagram from {from}: {err}");
				return;
			}
		};

		match message {
			Message::Alive(alive) => {
				if let Some(handler) = &mut self.alive {
					handler(alive);
				}
			}

			Message::Bye(bye) => {
				if let Some(handler) = &mut self.bye {
					handler(bye);
				}
			}

			Message::Search(search) => {
				if let Some(handler) = &mut self.search {
					handler(search);
				}
			}

			// Responses are unicast to whoever searched, so they only show up here by accident
			Message::Response(_) => log::trace!("ignoring search response from {from}"),
		}
	}
}
