use crate::socket::MulticastSocket;
use std::sync::Mutex;

mod builder;
pub use builder::MonitorBuilder;

mod handle;
pub use handle::MonitorHandle;

mod handlers;
use handlers::Handlers;

pub use crate::message::{AliveMessage, ByeMessage, SearchMessage};

/// Listens to the multicast group and reports the notifications and searches other peers send.
///
/// This can be created using the [`MonitorBuilder`].
pub struct Monitor {
	socket: MulticastSocket,
	handlers: Handlers,
}
impl Monitor {
	/// Runs the monitor on a background thread until the returned handle is closed or dropped.
	pub fn run_in_background(self) -> MonitorHandle {
		let close = self.socket.close_signal();

		let thread = std::thread::spawn(move || {
			tokio::runtime::Builder::new_current_thread()
				.thread_name("SSDP Monitor (Tokio)")
				.enable_all()
				.build()?
				.block_on(self.impl_run())
		});

		MonitorHandle {
			close,
			thread: Mutex::new(Some(thread)),
		}
	}

	/// Runs the monitor on the current thread. This only returns on an I/O error.
	pub fn run(self) -> Result<(), std::io::Error> {
		tokio::runtime::Builder::new_current_thread()
			.thread_name("SSDP Monitor (Tokio)")
			.enable_all()
			.build()?
			.block_on(self.impl_run())
	}
}
impl Monitor {
	async fn impl_run(self) -> Result<(), std::io::Error> {
		let Monitor { socket, mut handlers } = self;

		let socket = socket.into_async()?;

		socket
			.read_packets(None, |from, packet| {
				handlers.dispatch(from, packet);
				Ok::<_, std::io::Error>(())
			})
			.await?;

		log::debug!("monitor closed");

		Ok(())
	}
}
