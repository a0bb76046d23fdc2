use super::{Advertiser, AdvertiserConfig};
use crate::{errors::ListenError, location::Location, options::Options, socket::MulticastSocket};

/// Default `max-age` of advertised services, in seconds.
pub const DEFAULT_MAX_AGE: u32 = 1800;

pub struct AdvertiserBuilder {
	st: String,
	usn: String,
	location: Location,
	server: String,
	max_age: u32,
	options: Options,
}
impl AdvertiserBuilder {
	/// Creates a new [`AdvertiserBuilder`] for a service of type `st`, uniquely identified by `usn`.
	pub fn new(st: impl Into<String>, usn: impl Into<String>) -> Self {
		Self {
			st: st.into(),
			usn: usn.into(),
			location: Location::default(),
			server: String::new(),
			max_age: DEFAULT_MAX_AGE,
			options: Options::default(),
		}
	}

	/// Where the description of the service can be fetched from.
	pub fn location(mut self, location: impl Into<Location>) -> Self {
		self.location = location.into();
		self
	}

	/// The `SERVER` header sent with notifications and responses.
	pub fn server(mut self, server: impl Into<String>) -> Self {
		self.server = server.into();
		self
	}

	/// How long, in seconds, others may cache the advertisement.
	pub fn max_age(mut self, max_age: u32) -> Self {
		self.max_age = max_age;
		self
	}

	pub fn options(mut self, options: Options) -> Self {
		self.options = options;
		self
	}

	/// Opens the socket and joins the multicast group.
	pub fn build(self) -> Result<Advertiser, ListenError> {
		let AdvertiserBuilder {
			st,
			usn,
			location,
			server,
			max_age,
			options,
		} = self;

		let local = options.local_resolver().resolve()?;
		let group = options.remote_resolver().resolve()?;
		let socket = MulticastSocket::open(local, group, options.target_interface()?, options.multicast_ttl())?;

		log::debug!(
			"advertising {st} ({usn}) on {}, {} interface(s) joined",
			socket.local_addr()?,
			socket.interfaces().len()
		);

		Ok(Advertiser {
			socket,
			config: AdvertiserConfig {
				st,
				usn,
				location,
				server,
				max_age,
				group,
				advertise_host: options.adds_host(),
			},
		})
	}
}
