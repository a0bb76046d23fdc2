use clap::Parser;
use searchlight_ssdp::announce_bye;

#[path = "common/mod.rs"]
mod common;

/// Sends a single ssdp:byebye notification
#[derive(Parser, Debug)]
struct Cli {
	/// NT: notification type
	#[arg(short = 't', long = "type", default_value = "my:device")]
	nt: String,

	/// USN: unique service name
	#[arg(long, default_value = "unique:id")]
	usn: String,

	#[command(flatten)]
	net: common::NetArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();
	cli.net.init_logger();

	announce_bye(&cli.nt, &cli.usn, cli.net.ephemeral_local(), &cli.net.options()?)?;

	Ok(())
}
