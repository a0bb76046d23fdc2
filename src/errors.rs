//! Error types

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// An address string could not be resolved to an IPv4 socket address
pub enum ResolveError {
	#[error("Invalid address {addr:?}: {message}")]
	/// The address is malformed or the host could not be looked up
	InvalidAddress { addr: String, message: String },

	#[error("Address {0:?} has no IPv4 socket address")]
	/// The address resolved, but only to non-IPv4 addresses
	NoIpv4Address(String),
}

#[derive(Debug, Error)]
/// An error occurred while opening a multicast socket
pub enum ListenError {
	#[error("{0}")]
	/// The local or group address could not be resolved
	Resolve(#[from] ResolveError),

	#[error("I/O error: {0}")]
	/// An I/O error occurred
	IoError(#[from] std::io::Error),

	#[error("An explicit interface list can't be combined with the system assigned interface")]
	/// Both [`Options::interfaces`](crate::Options::interfaces) and
	/// [`Options::only_system_interface`](crate::Options::only_system_interface) were set
	ConflictingInterfaces,

	#[error("No usable interface is called {}", .0.join(", "))]
	/// [`Ipv4Interface::find_by_name`](crate::net::Ipv4Interface::find_by_name) was given names of interfaces
	/// that don't exist or aren't usable
	UnknownInterfaces(Vec<String>),

	#[error("No interfaces had joined the multicast group")]
	/// Joining the multicast group failed on every selected interface
	NoInterfacesJoined,
}

#[derive(Debug, Error)]
/// A message could not be queued for sending
pub enum SendError {
	#[error("The advertiser has been closed")]
	/// The advertiser has been closed, or its background thread has stopped
	Closed,
}

#[derive(Debug, Error)]
/// An error occurred while shutting down a background thread
pub enum ShutdownError {
	#[error("I/O error: {0}")]
	/// The background loop stopped with an I/O error
	IoError(#[from] std::io::Error),

	#[error("The background thread panicked")]
	/// The background thread panicked
	ThreadJoinError(Box<dyn std::any::Any + Send + 'static>),
}

#[derive(Debug, Error)]
/// An error occurred while searching for services
pub enum SearchError {
	#[error("{0}")]
	/// The search socket could not be opened
	Listen(#[from] ListenError),

	#[error("I/O error: {0}")]
	/// An I/O error occurred while sending the request or reading responses
	IoError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
/// An error occurred while sending a one-shot announcement
pub enum AnnounceError {
	#[error("{0}")]
	/// The announcement socket could not be opened
	Listen(#[from] ListenError),

	#[error("I/O error: {0}")]
	/// An I/O error occurred while sending the announcement
	IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// A datagram could not be understood as an SSDP message
pub enum ParseError {
	#[error("Unexpected method: {0:?}")]
	UnknownMethod(String),

	#[error("Malformed start line: {0:?}")]
	MalformedStartLine(String),

	#[error("Unexpected MAN: {0:?}")]
	UnexpectedMan(Option<String>),

	#[error("Malformed MX: {0:?}")]
	MalformedMx(String),

	#[error("Unknown NTS: {0:?}")]
	UnknownNts(Option<String>),

	#[error("Unexpected status code: {0}")]
	UnexpectedStatus(u16),
}
