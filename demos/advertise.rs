use clap::Parser;
use searchlight_ssdp::{advertise::AdvertiserBuilder, Location};
use std::{
	sync::{
		atomic::{AtomicBool, Ordering},
		Arc,
	},
	time::{Duration, Instant},
};

#[path = "common/mod.rs"]
mod common;

/// Advertises a service until interrupted
#[derive(Parser, Debug)]
struct Cli {
	/// ST: service type
	#[arg(long, default_value = "my:device")]
	st: String,

	/// USN: unique service name
	#[arg(long, default_value = "unique:id")]
	usn: String,

	/// LOCATION header
	#[arg(long, default_value = "")]
	loc: String,

	/// SERVER header
	#[arg(long, default_value = "")]
	srv: String,

	/// CACHE-CONTROL max-age
	#[arg(long, default_value_t = 1800)]
	maxage: u32,

	/// Seconds between ssdp:alive notifications (0 disables them)
	#[arg(long, default_value_t = 10)]
	ai: u64,

	#[command(flatten)]
	net: common::NetArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();
	cli.net.init_logger();

	let loc = cli.loc.clone();
	let location = Location::computed(move |from, iface| {
		match (from, iface) {
			(Some(from), _) => log::debug!("location requested by an M-SEARCH from {from}"),
			(None, Some(iface)) => log::debug!("location requested for an ssdp:alive on {iface}"),
			(None, None) => log::debug!("location requested for an ssdp:alive"),
		}
		loc.clone()
	});

	let advertiser = AdvertiserBuilder::new(cli.st, cli.usn)
		.location(location)
		.server(cli.srv)
		.max_age(cli.maxage)
		.options(cli.net.options()?)
		.build()?
		.run_in_background();

	let running = Arc::new(AtomicBool::new(true));
	{
		let running = running.clone();
		ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))?;
	}

	let interval = Duration::from_secs(cli.ai);
	let mut next_alive = Instant::now();
	while running.load(Ordering::SeqCst) {
		if cli.ai > 0 && Instant::now() >= next_alive {
			advertiser.alive()?;
			next_alive += interval;
		}
		std::thread::sleep(Duration::from_millis(100));
	}

	advertiser.bye()?;
	advertiser.close()?;

	Ok(())
}
