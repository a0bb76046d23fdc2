use crate::{
	announce::AlivePayload,
	location::Location,
	message::{self, SearchMessage},
	socket::{AsyncMulticastSocket, MulticastSocket},
};
use std::{
	net::{SocketAddr, SocketAddrV4},
	sync::{Arc, Mutex},
};
use tokio::sync::mpsc;

mod builder;
pub use builder::AdvertiserBuilder;

mod handle;
pub use handle::AdvertiserHandle;

mod outbox;
use outbox::{Outbox, Outgoing};

pub(crate) struct AdvertiserConfig {
	st: String,
	usn: String,
	location: Location,
	server: String,
	max_age: u32,
	group: SocketAddrV4,
	advertise_host: bool,
}
impl AdvertiserConfig {
	fn alive(&self) -> Outgoing {
		Outgoing::new(
			self.group.into(),
			AlivePayload {
				host: self.group,
				nt: self.st.clone(),
				usn: self.usn.clone(),
				location: self.location.clone(),
				server: self.server.clone(),
				max_age: self.max_age,
			},
		)
	}

	fn bye(&self) -> Outgoing {
		Outgoing::new(self.group.into(), message::build_bye(self.group, &self.st, &self.usn))
	}

	fn response(&self, to: SocketAddr) -> Outgoing {
		Outgoing::new(
			to,
			message::build_ok(
				&self.st,
				&self.usn,
				&self.location.resolve(Some(to), None),
				&self.server,
				self.max_age,
				self.advertise_host.then_some(self.group),
			),
		)
	}
}

/// An SSDP advertiser that has joined the multicast group, ready to be run.
///
/// This can be created using the [`AdvertiserBuilder`].
pub struct Advertiser {
	socket: MulticastSocket,
	config: AdvertiserConfig,
}
impl Advertiser {
	/// Starts answering `M-SEARCH` requests on a background thread.
	///
	/// The returned handle sends `ssdp:alive` and `ssdp:byebye` notifications and stops the advertiser
	/// when closed or dropped.
	pub fn run_in_background(self) -> AdvertiserHandle {
		let Advertiser { socket, config } = self;

		let config = Arc::new(config);
		let (queue_tx, queue_rx) = mpsc::unbounded_channel();
		let outbox = Outbox::new(queue_tx);

		let thread = {
			let config = config.clone();
			let outbox = outbox.clone();
			std::thread::spawn(move || {
				tokio::runtime::Builder::new_current_thread()
					.thread_name("SSDP Advertiser (Tokio)")
					.enable_all()
					.build()?
					.block_on(Self::impl_run(socket, config, outbox, queue_rx))
			})
		};

		AdvertiserHandle {
			config,
			outbox,
			thread: Mutex::new(Some(thread)),
		}
	}
}
impl Advertiser {
	async fn impl_run(
		socket: MulticastSocket,
		config: Arc<AdvertiserConfig>,
		outbox: Outbox,
		queue_rx: mpsc::UnboundedReceiver<Outgoing>,
	) -> Result<(), std::io::Error> {
		let socket = socket.into_async()?;

		// Shutdown order: the handle closes the outbox, the send loop drains whatever is still queued and
		// exits, and only then is the socket closed, which stops the receive loop.
		let sending = async {
			Self::send_loop(&socket, queue_rx).await;
			socket.close();
		};

		let ((), received) = tokio::join!(sending, Self::recv_loop(&socket, &config, &outbox));
		received
	}

	async fn send_loop(socket: &AsyncMulticastSocket, mut queue_rx: mpsc::UnboundedReceiver<Outgoing>) {
		while let Some(Outgoing { to, payload }) = queue_rx.recv().await {
			match socket.send_to(&*payload, to).await {
				Ok(sent) => log::trace!("sent {sent} bytes to {to}"),
				Err(err) => log::warn!("failed to send to {to}: {err}"),
			}
		}
	}

	async fn recv_loop(socket: &AsyncMulticastSocket, config: &AdvertiserConfig, outbox: &Outbox) -> Result<(), std::io::Error> {
		socket
			.read_packets(None, |from, packet| {
				Self::recv_packet(config, outbox, from, packet);
				Ok::<_, std::io::Error>(())
			})
			.await?;

		Ok(())
	}

	/// Queues a response to matching `M-SEARCH` requests. Everything else is ignored.
	fn recv_packet(config: &AdvertiserConfig, outbox: &Outbox, from: SocketAddr, packet: &[u8]) {
		if !packet.starts_with(b"M-SEARCH ") {
			return;
		}

		let request = match SearchMessage::parse(from, packet) {
			Ok(request) => request,
			Err(err) => {
				log::debug!("ignoring M-SEARCH from {from}: {err}");
				return;
			}
		};

		if !message::search_matches(&config.st, request.search_type()) {
			return;
		}

		if outbox.send(config.response(from)).is_err() {
			log::debug!("advertiser is closing, dropped response to {from}");
		}
	}
}
