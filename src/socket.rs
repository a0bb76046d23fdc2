use crate::{
	errors::ListenError,
	net::{Ipv4Interface, MulticastSocketEx, TargetInterface},
};
use std::{
	borrow::Cow,
	net::{Ipv4Addr, SocketAddr, SocketAddrV4},
	sync::Arc,
	time::Duration,
};
use tokio::{net::UdpSocket as AsyncUdpSocket, sync::watch};

/// Largest possible UDP payload
const MAX_DATAGRAM: usize = 65535;

/// The body of a message, which may depend on the interface it is about to be sent from.
///
/// `iface` is `None` for unicast sends and when the OS picks the interface.
pub(crate) trait Payload {
	fn bytes(&self, iface: Option<&Ipv4Interface>) -> Cow<'_, [u8]>;
}
impl Payload for [u8] {
	#[inline(always)]
	fn bytes(&self, _iface: Option<&Ipv4Interface>) -> Cow<'_, [u8]> {
		Cow::Borrowed(self)
	}
}
impl Payload for Vec<u8> {
	#[inline(always)]
	fn bytes(&self, _iface: Option<&Ipv4Interface>) -> Cow<'_, [u8]> {
		Cow::Borrowed(self)
	}
}

/// Marks a socket as closed. Shared between the socket and whoever needs to close it from another thread.
#[derive(Clone)]
pub(crate) struct CloseSignal(Arc<watch::Sender<bool>>);
impl CloseSignal {
	fn new() -> Self {
		Self(Arc::new(watch::channel(false).0))
	}

	#[inline(always)]
	pub fn close(&self) {
		self.0.send_replace(true);
	}

	#[inline(always)]
	pub fn is_closed(&self) -> bool {
		*self.0.borrow()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Why [`MulticastSocket::read_packets`] stopped without an error.
pub(crate) enum ReadEnd {
	TimedOut,
	Closed,
}

pub(crate) type AsyncMulticastSocket = MulticastSocket<AsyncUdpSocket>;

/// A UDP socket that has joined a multicast group on one or more interfaces.
pub(crate) struct MulticastSocket<S = std::net::UdpSocket> {
	socket: S,
	group: SocketAddrV4,

	/// Interfaces that joined the group. Empty when the OS assigned the interface.
	ifaces: Vec<Ipv4Interface>,

	closed: CloseSignal,
}
impl MulticastSocket<std::net::UdpSocket> {
	pub fn open(local: SocketAddrV4, group: SocketAddrV4, interface: TargetInterface, ttl: u32) -> Result<Self, ListenError> {
		let socket = socket2::Socket::new(socket2::Domain::IPV4, socket2::Type::DGRAM, Some(socket2::Protocol::UDP))?;
		socket.set_reuse_address(true)?;

		#[cfg(unix)]
		{
			socket.set_reuse_port(true)?;
		}

		// A multicast address can't be bound directly, so listen on every address with the same port
		let bind = if local.ip().is_multicast() {
			SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, local.port())
		} else {
			local
		};
		socket.bind(&socket2::SockAddr::from(bind))?;

		socket.set_multicast_loop_v4(true)?;
		if ttl > 0 {
			socket.set_multicast_ttl_v4(ttl)?;
		}

		let ifaces = match interface {
			TargetInterface::Default => {
				if let Err(err) = socket.join_multicast_v4(group.ip(), &Ipv4Addr::UNSPECIFIED) {
					log::warn!("failed to join group {group} on the system assigned interface: {err}");
					return Err(ListenError::NoInterfacesJoined);
				}
				log::debug!("joined group {group} on the system assigned interface");
				Vec::new()
			}

			TargetInterface::Multi(ifaces) => {
				let joined = ifaces
					.into_iter()
					.filter(|iface| match socket.join_multicast_v4(group.ip(), &iface.addr) {
						Ok(()) => {
							log::debug!("joined group {group} on {iface}");
							true
						}
						Err(err) => {
							log::warn!("failed to join group {group} on {iface}: {err}");
							false
						}
					})
					.collect::<Vec<_>>();

				if joined.is_empty() {
					return Err(ListenError::NoInterfacesJoined);
				}

				joined
			}
		};

		socket.set_nonblocking(true)?;

		log::debug!("listening on {bind} for group {group}");

		Ok(Self {
			socket: socket.into(),
			group,
			ifaces,
			closed: CloseSignal::new(),
		})
	}

	/// Registers the socket with the Tokio runtime of the calling thread.
	pub fn into_async(self) -> Result<AsyncMulticastSocket, std::io::Error> {
		let MulticastSocket { socket, group, ifaces, closed } = self;
		Ok(MulticastSocket {
			socket: AsyncUdpSocket::from_std(socket)?,
			group,
			ifaces,
			closed,
		})
	}

	#[inline(always)]
	pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
		self.socket.local_addr()
	}
}
impl<S> MulticastSocket<S> {
	#[inline(always)]
	pub fn group(&self) -> SocketAddrV4 {
		self.group
	}

	#[inline(always)]
	pub fn interfaces(&self) -> &[Ipv4Interface] {
		&self.ifaces
	}

	#[inline(always)]
	pub fn close_signal(&self) -> CloseSignal {
		self.closed.clone()
	}

	/// Closes the socket: pending and future reads end with [`ReadEnd::Closed`] and sends fail.
	///
	/// Closing more than once has no further effect.
	#[inline(always)]
	pub fn close(&self) {
		self.closed.close();
	}
}
impl AsyncMulticastSocket {
	/// Sends `payload` to `to`.
	///
	/// Unicast destinations get a single send. Multicast destinations get one send per joined interface,
	/// stopping at the first error, or a single send when the OS assigned the interface.
	pub async fn send_to<P>(&self, payload: &P, to: SocketAddr) -> Result<usize, std::io::Error>
	where
		P: Payload + ?Sized,
	{
		if self.closed.is_closed() {
			return Err(std::io::Error::new(std::io::ErrorKind::NotConnected, "Multicast socket is closed"));
		}

		if !to.ip().is_multicast() || self.ifaces.is_empty() {
			return self.socket.send_to(&payload.bytes(None), to).await;
		}

		let mut sent = 0;
		for iface in self.ifaces.iter() {
			self.socket.set_multicast_if(iface.addr)?;
			sent += self.socket.send_to(&payload.bytes(Some(iface)), to).await?;
		}

		Ok(sent)
	}

	/// Reads datagrams and hands each of them to `handler` before reading the next one.
	///
	/// With a `timeout`, reading stops cleanly once that much time has passed since the call.
	/// Without one, reading only stops when the socket is closed or an error occurs.
	pub async fn read_packets<F, E>(&self, timeout: Option<Duration>, mut handler: F) -> Result<ReadEnd, E>
	where
		F: FnMut(SocketAddr, &[u8]) -> Result<(), E>,
		E: From<std::io::Error>,
	{
		let deadline = timeout.map(|timeout| tokio::time::Instant::now() + timeout);
		let mut closed = self.closed.0.subscribe();
		let mut buf = vec![0u8; MAX_DATAGRAM];

		loop {
			let recv = async {
				match deadline {
					Some(deadline) => tokio::time::timeout_at(deadline, self.socket.recv_from(&mut buf)).await.ok(),
					None => Some(self.socket.recv_from(&mut buf).await),
				}
			};

			let (count, from) = tokio::select! {
				biased;

				_ = closed.wait_for(|closed| *closed) => return Ok(ReadEnd::Closed),

				recv = recv => match recv {
					Some(recv) => recv?,
					None => return Ok(ReadEnd::TimedOut),
				},
			};

			handler(from, &buf[..count])?;
		}
	}
}
