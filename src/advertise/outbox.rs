use crate::{errors::SendError, socket::Payload};
use std::{
	net::SocketAddr,
	sync::{Arc, Mutex, PoisonError},
};
use tokio::sync::mpsc::UnboundedSender;

/// A message waiting for the send loop.
pub(super) struct Outgoing {
	pub(super) to: SocketAddr,
	pub(super) payload: Box<dyn Payload + Send>,
}
impl Outgoing {
	#[inline(always)]
	pub(super) fn new(to: SocketAddr, payload: impl Payload + Send + 'static) -> Self {
		Self {
			to,
			payload: Box::new(payload),
		}
	}
}

/// The sending half of the outbound queue, closable from any thread.
///
/// Once closed, nothing more can be queued and the send loop exits after draining the queue.
#[derive(Clone)]
pub(super) struct Outbox(Arc<Mutex<Option<UnboundedSender<Outgoing>>>>);
impl Outbox {
	pub(super) fn new(queue_tx: UnboundedSender<Outgoing>) -> Self {
		Self(Arc::new(Mutex::new(Some(queue_tx))))
	}

	pub(super) fn send(&self, outgoing: Outgoing) -> Result<(), SendError> {
		match &*self.0.lock().unwrap_or_else(PoisonError::into_inner) {
			Some(queue_tx) => queue_tx.send(outgoing).map_err(|_| SendError::Closed),
			None => Err(SendError::Closed),
		}
	}

	pub(super) fn close(&self) {
		self.0.lock().unwrap_or_else(PoisonError::into_inner).take();
	}
}
