use clap::Parser;
use searchlight_ssdp::search::search;

#[path = "common/mod.rs"]
mod common;

/// Searches for services and prints every response
#[derive(Parser, Debug)]
struct Cli {
	/// Search type
	#[arg(short = 't', long = "type", default_value = searchlight_ssdp::ALL)]
	search_type: String,

	/// Seconds to wait for responses
	#[arg(short, long, default_value_t = 1)]
	wait: u32,

	#[command(flatten)]
	net: common::NetArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();
	cli.net.init_logger();

	let services = search(&cli.search_type, cli.wait, cli.net.ephemeral_local(), &cli.net.options()?)?;

	for (i, service) in services.iter().enumerate() {
		println!(
			"{i}: {} {} (from {})",
			service.search_type(),
			service.location().unwrap_or_default(),
			service.from()
		);
	}

	Ok(())
}
