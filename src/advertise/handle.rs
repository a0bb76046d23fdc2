use super::{outbox::Outbox, AdvertiserConfig};
use crate::errors::{SendError, ShutdownError};
use std::sync::{Arc, Mutex, PoisonError};

/// A handle to an [`Advertiser`](super::Advertiser) running in the background.
///
/// Dropping the handle closes the advertiser.
pub struct AdvertiserHandle {
	pub(super) config: Arc<AdvertiserConfig>,
	pub(super) outbox: Outbox,
	pub(super) thread: Mutex<Option<std::thread::JoinHandle<Result<(), std::io::Error>>>>,
}
impl AdvertiserHandle {
	/// Announces the service with an `ssdp:alive` notification on every joined interface.
	pub fn alive(&self) -> Result<(), SendError> {
		self.outbox.send(self.config.alive())?;
		log::debug!("queued ssdp:alive for {}", self.config.usn);
		Ok(())
	}

	/// Announces that the service is going away with an `ssdp:byebye` notification on every joined interface.
	pub fn bye(&self) -> Result<(), SendError> {
		self.outbox.send(self.config.bye())?;
		log::debug!("queued ssdp:byebye for {}", self.config.usn);
		Ok(())
	}

	#[inline(always)]
	/// The service type being advertised.
	pub fn search_type(&self) -> &str {
		&self.config.st
	}

	#[inline(always)]
	pub fn usn(&self) -> &str {
		&self.config.usn
	}

	/// Stops the advertiser.
	///
	/// Notifications queued before this call are still sent. Closing an advertiser that is already
	/// closed does nothing, and a close racing another one returns once the advertiser has stopped.
	pub fn close(&self) -> Result<(), ShutdownError> {
		// Held until the thread is joined, so a concurrent close waits for the shutdown to finish
		let mut slot = self.thread.lock().unwrap_or_else(PoisonError::into_inner);
		let thread = match slot.take() {
			Some(thread) => thread,
			None => return Ok(()),
		};

		// Closing the outbox lets the send loop drain and exit, which closes the socket and ends the receive loop
		self.outbox.close();

		match thread.join() {
			Ok(Ok(_)) => Ok(()),
			Ok(Err(err)) => Err(ShutdownError::IoError(err)),
			Err(err) => Err(ShutdownError::ThreadJoinError(err)),
		}
	}
}
impl Drop for AdvertiserHandle {
	fn drop(&mut self) {
		if let Err(err) = self.close() {
			log::warn!("advertiser shut down with an error: {err}");
		}
	}
}
