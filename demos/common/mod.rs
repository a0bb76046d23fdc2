#![allow(dead_code)]

use clap::Args;
use searchlight_ssdp::{errors::ListenError, net::Ipv4Interface, Options};

#[derive(Args, Debug)]
pub struct NetArgs {
	/// Local address to listen on (defaults to 224.0.0.1:1900, or any address for searches and announcements)
	#[arg(short = 'l', long)]
	pub local: Option<String>,

	/// Multicast group address
	#[arg(long)]
	pub remote: Option<String>,

	/// TTL of outgoing multicast packets (0 keeps the OS default)
	#[arg(long, default_value_t = 0)]
	pub ttl: u32,

	/// Use the system assigned multicast interface
	#[arg(long)]
	pub sysif: bool,

	/// Only use these interfaces, by name
	#[arg(short = 'i', long = "iface")]
	pub ifaces: Vec<String>,

	/// Add a HOST header to search responses
	#[arg(long)]
	pub host: bool,

	/// Verbose mode
	#[arg(short, long)]
	pub verbose: bool,
}
impl NetArgs {
	pub fn init_logger(&self) {
		if self.verbose {
			simple_logger::SimpleLogger::new().with_level(log::LevelFilter::Debug).init().ok();
		}
	}

	pub fn options(&self) -> Result<Options, ListenError> {
		let mut options = Options::new().ttl(self.ttl);

		if let Some(local) = &self.local {
			options = options.local_addr(local.as_str());
		}
		if let Some(remote) = &self.remote {
			options = options.remote_addr(remote.as_str());
		}
		if self.sysif {
			options = options.only_system_interface();
		}
		if !self.ifaces.is_empty() {
			options = options.interfaces(Ipv4Interface::find_by_name(&self.ifaces)?);
		}
		if self.host {
			options = options.advertise_host();
		}

		Ok(options)
	}

	/// The local address for one-shot sends: any address unless one was given.
	pub fn ephemeral_local(&self) -> &str {
		self.local.as_deref().unwrap_or("")
	}
}
