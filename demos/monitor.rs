use clap::Parser;
use searchlight_ssdp::monitor::MonitorBuilder;
use std::sync::mpsc;

#[path = "common/mod.rs"]
mod common;

/// Prints the SSDP notifications and searches seen on the network until interrupted
#[derive(Parser, Debug)]
struct Cli {
	/// Also print M-SEARCH requests
	#[arg(long)]
	search: bool,

	#[command(flatten)]
	net: common::NetArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();
	cli.net.init_logger();

	let mut monitor = MonitorBuilder::new()
		.on_alive(|m| {
			println!(
				"Alive: From={} Type={} USN={} Location={} Server={} MaxAge={:?}",
				m.from(),
				m.notification_type(),
				m.usn(),
				m.location().unwrap_or_default(),
				m.server().unwrap_or_default(),
				m.max_age()
			)
		})
		.on_bye(|m| println!("Bye: From={} Type={} USN={}", m.from(), m.notification_type(), m.usn()));

	if cli.search {
		monitor = monitor.on_search(|m| println!("Search: From={} Type={} MX={:?}", m.from(), m.search_type(), m.mx()));
	}

	let monitor = monitor.options(cli.net.options()?).build()?.run_in_background();

	let (quit_tx, quit_rx) = mpsc::channel();
	ctrlc::set_handler(move || {
		quit_tx.send(()).ok();
	})?;
	quit_rx.recv().ok();

	monitor.close()?;

	Ok(())
}
