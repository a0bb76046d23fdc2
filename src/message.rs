//! Building and parsing SSDP messages
//!
//! SSDP messages look like HTTP, but are parsed loosely: lines may end in `\n` or `\r\n`, the
//! terminating blank line is optional and header lines that don't look like headers are skipped.

use crate::{errors::ParseError, ALL, ROOT_DEVICE};
use std::{
	fmt::{Display, Write},
	net::{SocketAddr, SocketAddrV4},
	sync::OnceLock,
};

mod headers;
pub use headers::Headers;

mod max_age;
pub use max_age::extract_max_age;

/// The only `MAN` value an `M-SEARCH` request may carry, quotes included.
pub const MAN_DISCOVER: &str = "\"ssdp:discover\"";

pub const NTS_ALIVE: &str = "ssdp:alive";
pub const NTS_BYEBYE: &str = "ssdp:byebye";

/// Whether an advertiser of `advertised` should answer a search for `requested`.
pub fn search_matches(advertised: &str, requested: &str) -> bool {
	requested == ALL || requested == ROOT_DEVICE || requested == advertised
}

struct MessageWriter(String);
impl MessageWriter {
	fn new(start_line: &str) -> Self {
		let mut message = String::with_capacity(256);
		message.push_str(start_line);
		message.push_str("\r\n");
		Self(message)
	}

	fn header(mut self, name: &str, value: impl Display) -> Self {
		// Writing to a String can't fail
		let _ = write!(self.0, "{name}: {value}\r\n");
		self
	}

	fn optional_header(self, name: &str, value: &str) -> Self {
		if value.is_empty() {
			self
		} else {
			self.header(name, value)
		}
	}

	fn finish(mut self) -> Vec<u8> {
		self.0.push_str("\r\n");
		self.0.into_bytes()
	}
}

/// Builds an `ssdp:alive` notification. Empty `location` and `server` values are left out.
pub fn build_alive(host: SocketAddrV4, nt: &str, usn: &str, location: &str, server: &str, max_age: u32) -> Vec<u8> {
	MessageWriter::new("NOTIFY * HTTP/1.1")
		.header("HOST", host)
		.header("NT", nt)
		.header("NTS", NTS_ALIVE)
		.header("USN", usn)
		.optional_header("LOCATION", location)
		.optional_header("SERVER", server)
		.header("CACHE-CONTROL", format_args!("max-age={max_age}"))
		.finish()
}

/// Builds an `ssdp:byebye` notification.
pub fn build_bye(host: SocketAddrV4, nt: &str, usn: &str) -> Vec<u8> {
	MessageWriter::new("NOTIFY * HTTP/1.1")
		.header("HOST", host)
		.header("NT", nt)
		.header("NTS", NTS_BYEBYE)
		.header("USN", usn)
		.finish()
}

/// Builds an `M-SEARCH` request asking responders to answer within `mx` seconds.
pub fn build_search(host: SocketAddrV4, st: &str, mx: u32) -> Vec<u8> {
	MessageWriter::new("M-SEARCH * HTTP/1.1")
		.header("HOST", host)
		.header("MAN", MAN_DISCOVER)
		.header("MX", mx)
		.header("ST", st)
		.finish()
}

/// Builds the `200 OK` response to an `M-SEARCH` request. Empty `location` and `server` values are left out.
pub fn build_ok(st: &str, usn: &str, location: &str, server: &str, max_age: u32, host: Option<SocketAddrV4>) -> Vec<u8> {
	let message = MessageWriter::new("HTTP/1.1 200 OK")
		.header("EXT", "")
		.header("ST", st)
		.header("USN", usn)
		.optional_header("LOCATION", location)
		.optional_header("SERVER", server)
		.header("CACHE-CONTROL", format_args!("max-age={max_age}"));

	let message = match host {
		Some(host) => message.header("HOST", host),
		None => message,
	};

	message.finish()
}

#[derive(Debug, Clone)]
/// An SSDP message received from the network.
pub enum Message {
	/// An `M-SEARCH` request
	Search(SearchMessage),

	/// A `NOTIFY` with `NTS: ssdp:alive`
	Alive(AliveMessage),

	/// A `NOTIFY` with `NTS: ssdp:byebye`
	Bye(ByeMessage),

	/// A `200 OK` response to an `M-SEARCH` request
	Response(Service),
}

/// Classifies and parses a datagram by its leading token.
pub fn parse(from: SocketAddr, data: &[u8]) -> Result<Message, ParseError> {
	if data.starts_with(b"M-SEARCH ") {
		SearchMessage::parse(from, data).map(Message::Search)
	} else if data.starts_with(b"NOTIFY ") {
		parse_notify(from, data)
	} else if data.starts_with(b"HTTP") {
		Service::parse(from, data).map(Message::Response)
	} else {
		Err(ParseError::UnknownMethod(first_line(data)))
	}
}

fn parse_notify(from: SocketAddr, data: &[u8]) -> Result<Message, ParseError> {
	let (start_line, headers) = split_message(data);
	check_request_line(&start_line)?;

	match headers.get("NTS") {
		Some(NTS_ALIVE) => Ok(Message::Alive(AliveMessage {
			from,
			headers,
			max_age: OnceLock::new(),
		})),

		Some(NTS_BYEBYE) => Ok(Message::Bye(ByeMessage { from, headers })),

		nts => Err(ParseError::UnknownNts(nts.map(str::to_owned))),
	}
}

fn first_line(data: &[u8]) -> String {
	let end = data.iter().position(|&byte| byte == b'\r' || byte == b'\n').unwrap_or(data.len());
	String::from_utf8_lossy(&data[..end]).into_owned()
}

fn split_message(data: &[u8]) -> (String, Headers) {
	let text = String::from_utf8_lossy(data);
	let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

	let start_line = lines.next().unwrap_or_default().trim().to_owned();

	let mut headers = Headers::new();
	for line in lines {
		if line.is_empty() {
			break;
		}

		match line.split_once(':') {
			Some((name, value)) if !name.trim().is_empty() => headers.push(name.trim(), value.trim()),
			_ => log::trace!("skipping malformed header line {line:?}"),
		}
	}

	(start_line, headers)
}

/// `<method> <target> HTTP/<version>`
fn check_request_line(line: &str) -> Result<(), ParseError> {
	let mut parts = line.split_whitespace();
	match (parts.next(), parts.next(), parts.next()) {
		(Some(_), Some(_), Some(version)) if version.starts_with("HTTP/") => Ok(()),
		_ => Err(ParseError::MalformedStartLine(line.to_owned())),
	}
}

/// `HTTP/<version> <status> [reason]`
fn response_status(line: &str) -> Result<u16, ParseError> {
	let mut parts = line.split_whitespace();
	match (parts.next(), parts.next().and_then(|status| status.parse::<u16>().ok())) {
		(Some(version), Some(status)) if version.starts_with("HTTP/") => Ok(status),
		_ => Err(ParseError::MalformedStartLine(line.to_owned())),
	}
}

#[derive(Debug, Clone)]
/// An `M-SEARCH` request.
pub struct SearchMessage {
	from: SocketAddr,
	mx: Option<u32>,
	headers: Headers,
}
impl SearchMessage {
	/// Parses an `M-SEARCH` request, rejecting it unless `MAN` is exactly [`MAN_DISCOVER`].
	pub fn parse(from: SocketAddr, data: &[u8]) -> Result<Self, ParseError> {
		if !data.starts_with(b"M-SEARCH ") {
			return Err(ParseError::UnknownMethod(first_line(data)));
		}

		let (start_line, headers) = split_message(data);
		check_request_line(&start_line)?;

		match headers.get("MAN") {
			Some(MAN_DISCOVER) => {}
			man => return Err(ParseError::UnexpectedMan(man.map(str::to_owned))),
		}

		let mx = match headers.get("MX") {
			Some(mx) => Some(mx.parse::<u32>().map_err(|_| ParseError::MalformedMx(mx.to_owned()))?),
			None => None,
		};

		Ok(Self { from, mx, headers })
	}

	#[inline(always)]
	/// The address the request came from.
	pub fn from(&self) -> SocketAddr {
		self.from
	}

	#[inline(always)]
	/// The `ST` header: the type of service being searched for.
	pub fn search_type(&self) -> &str {
		self.headers.get("ST").unwrap_or_default()
	}

	#[inline(always)]
	/// The `MX` header: how many seconds responders may wait before answering.
	pub fn mx(&self) -> Option<u32> {
		self.mx
	}

	#[inline(always)]
	pub fn headers(&self) -> &Headers {
		&self.headers
	}
}

#[derive(Debug, Clone)]
/// An `ssdp:alive` notification.
pub struct AliveMessage {
	from: SocketAddr,
	headers: Headers,
	max_age: OnceLock<Option<u32>>,
}
impl AliveMessage {
	#[inline(always)]
	/// The address the notification came from.
	pub fn from(&self) -> SocketAddr {
		self.from
	}

	#[inline(always)]
	/// The `NT` header: the type of the announced service.
	pub fn notification_type(&self) -> &str {
		self.headers.get("NT").unwrap_or_default()
	}

	#[inline(always)]
	pub fn usn(&self) -> &str {
		self.headers.get("USN").unwrap_or_default()
	}

	#[inline(always)]
	pub fn location(&self) -> Option<&str> {
		self.headers.get("LOCATION")
	}

	#[inline(always)]
	pub fn server(&self) -> Option<&str> {
		self.headers.get("SERVER")
	}

	#[inline(always)]
	pub fn headers(&self) -> &Headers {
		&self.headers
	}

	/// The `max-age` directive of the `CACHE-CONTROL` header, if there is a valid one.
	pub fn max_age(&self) -> Option<u32> {
		*self
			.max_age
			.get_or_init(|| self.headers.get("CACHE-CONTROL").and_then(|value| extract_max_age(value, None)))
	}
}

#[derive(Debug, Clone)]
/// An `ssdp:byebye` notification.
pub struct ByeMessage {
	from: SocketAddr,
	headers: Headers,
}
impl ByeMessage {
	#[inline(always)]
	/// The address the notification came from.
	pub fn from(&self) -> SocketAddr {
		self.from
	}

	#[inline(always)]
	/// The `NT` header: the type of the departing service.
	pub fn notification_type(&self) -> &str {
		self.headers.get("NT").unwrap_or_default()
	}

	#[inline(always)]
	pub fn usn(&self) -> &str {
		self.headers.get("USN").unwrap_or_default()
	}

	#[inline(always)]
	pub fn headers(&self) -> &Headers {
		&self.headers
	}
}

#[derive(Debug, Clone)]
/// A service that answered an `M-SEARCH` request.
pub struct Service {
	from: SocketAddr,
	headers: Headers,
	max_age: OnceLock<Option<u32>>,
}
impl Service {
	/// Parses a `200 OK` response to an `M-SEARCH` request.
	pub fn parse(from: SocketAddr, data: &[u8]) -> Result<Self, ParseError> {
		if !data.starts_with(b"HTTP") {
			return Err(ParseError::UnknownMethod(first_line(data)));
		}

		let (start_line, headers) = split_message(data);
		match response_status(&start_line)? {
			200 => Ok(Self {
				from,
				headers,
				max_age: OnceLock::new(),
			}),
			status => Err(ParseError::UnexpectedStatus(status)),
		}
	}

	#[inline(always)]
	/// The address the response came from.
	pub fn from(&self) -> SocketAddr {
		self.from
	}

	#[inline(always)]
	/// The `ST` header: the type of the service.
	pub fn search_type(&self) -> &str {
		self.headers.get("ST").unwrap_or_default()
	}

	#[inline(always)]
	pub fn usn(&self) -> &str {
		self.headers.get("USN").unwrap_or_default()
	}

	#[inline(always)]
	pub fn location(&self) -> Option<&str> {
		self.headers.get("LOCATION")
	}

	#[inline(always)]
	pub fn server(&self) -> Option<&str> {
		self.headers.get("SERVER")
	}

	#[inline(always)]
	pub fn headers(&self) -> &Headers {
		&self.headers
	}

	/// The `max-age` directive of the `CACHE-CONTROL` header, if there is a valid one.
	pub fn max_age(&self) -> Option<u32> {
		*self
			.max_age
			.get_or_init(|| self.headers.get("CACHE-CONTROL").and_then(|value| extract_max_age(value, None)))
	}
}
