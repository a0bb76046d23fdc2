use clap::Parser;
use searchlight_ssdp::announce_alive;

#[path = "common/mod.rs"]
mod common;

/// Sends a single ssdp:alive notification
#[derive(Parser, Debug)]
struct Cli {
	/// NT: notification type
	#[arg(short = 't', long = "type", default_value = "my:device")]
	nt: String,

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

	#[command(flatten)]
	net: common::NetArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();
	cli.net.init_logger();

	announce_alive(
		&cli.nt,
		&cli.usn,
		cli.loc.as_str(),
		&cli.srv,
		cli.maxage,
		cli.net.ephemeral_local(),
		&cli.net.options()?,
	)?;

	Ok(())
}
