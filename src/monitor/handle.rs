use crate::{errors::ShutdownError, socket::CloseSignal};
use std::sync::{Mutex, PoisonError};

/// A handle to a [`Monitor`](super::Monitor) running in the background.
///
/// Dropping the handle closes the monitor.
pub struct MonitorHandle {
	pub(super) close: CloseSignal,
	pub(super) thread: Mutex<Option<std::thread::JoinHandle<Result<(), std::io::Error>>>>,
}
impl MonitorHandle {
	/// Stops the monitor and waits for its thread to finish.
	///
	/// No handler is called after this returns. Closing a monitor that is already closed does nothing.
	pub fn close(&self) -> Result<(), ShutdownError> {
		// Held until the thread is joined, so a concurrent close waits for the shutdown to finish
		let mut slot = self.thread.lock().unwrap_or_else(PoisonError::into_inner);
		let thread = match slot.take() {
			Some(thread) => thread,
			None => return Ok(()),
		};

		self.close.close();

		match thread.join() {
			Ok(Ok(_)) => Ok(()),
			Ok(Err(err)) => Err(ShutdownError::IoError(err)),
			Err(err) => Err(ShutdownError::ThreadJoinError(err)),
		}
	}
}
impl Drop for MonitorHandle {
	fn drop(&mut self) {
		if let Err(err) = self.close() {
			log::warn!("monitor shut down with an error: {err}");
		}
	}
}
