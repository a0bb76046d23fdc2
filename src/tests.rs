use crate::{
	errors::{ListenError, ParseError, ResolveError},
	message::{self, extract_max_age, Message, SearchMessage, Service},
	net::{select_by_name, Ipv4Interface, TargetInterface},
	resolver::AddrResolver,
	socket::{MulticastSocket, ReadEnd},
	Location, Options, ALL, DEFAULT_REMOTE_ADDR, ROOT_DEVICE, SSDP_V4_ADDR,
};
use std::{
	net::{Ipv4Addr, SocketAddr, SocketAddrV4},
	time::Duration,
};

fn peer() -> SocketAddr {
	"192.168.1.69:50000".parse().unwrap()
}

#[test]
fn test_extract_max_age() {
	for (value, expected) in [
		("", None),
		("max-age=100", Some(100)),
		("max-age = 200", Some(200)),
		("max-age= 300", Some(300)),
		("max-age =400", Some(400)),
		("max-age=-100", None),
		("foo=100", None),
		("foomax-age=100", None),
		(";max-age=500;", Some(500)),
		(";max-age=600", Some(600)),
		("max-age=700;", Some(700)),
		("no-cache, MAX-AGE=800", Some(800)),
		("max-age=900x", None),
		("max-age=99999999999", None),
	] {
		assert_eq!(extract_max_age(value, None), expected, "max-age of {value:?}");
	}

	assert_eq!(extract_max_age("foo=100", Some(42)), Some(42));
	assert_eq!(extract_max_age("foomax-age=1, max-age=2", None), Some(2));
}

#[test]
fn test_alive_round_trip() {
	let packet = message::build_alive(SSDP_V4_ADDR, "urn:test:1", "uuid:1234", "http://x/", "srv/1", 600);

	let alive = match message::parse(peer(), &packet).unwrap() {
		Message::Alive(alive) => alive,
		message => panic!("expected alive, got {message:?}"),
	};

	assert_eq!(alive.from(), peer());
	assert_eq!(alive.notification_type(), "urn:test:1");
	assert_eq!(alive.usn(), "uuid:1234");
	assert_eq!(alive.location(), Some("http://x/"));
	assert_eq!(alive.server(), Some("srv/1"));
	assert_eq!(alive.max_age(), Some(600));
	assert_eq!(alive.headers().get("host"), Some("239.255.255.250:1900"));
}

#[test]
fn test_alive_without_optional_headers() {
	let packet = message::build_alive(SSDP_V4_ADDR, "urn:test:1", "uuid:1234", "", "", 0);
	let text = String::from_utf8(packet.clone()).unwrap();

	assert!(!text.contains("LOCATION"));
	assert!(!text.contains("SERVER"));
	assert!(text.ends_with("\r\n\r\n"));

	match message::parse(peer(), &packet).unwrap() {
		Message::Alive(alive) => {
			assert_eq!(alive.location(), None);
			assert_eq!(alive.max_age(), Some(0));
		}
		message => panic!("expected alive, got {message:?}"),
	}
}

#[test]
fn test_bye_round_trip() {
	let packet = message::build_bye(SSDP_V4_ADDR, "urn:test:1", "uuid:1234");

	match message::parse(peer(), &packet).unwrap() {
		Message::Bye(bye) => {
			assert_eq!(bye.notification_type(), "urn:test:1");
			assert_eq!(bye.usn(), "uuid:1234");
		}
		message => panic!("expected bye, got {message:?}"),
	}
}

#[test]
fn test_notify_with_unknown_nts() {
	let packet = b"NOTIFY * HTTP/1.1\r\nNT: urn:test:1\r\nNTS: ssdp:update\r\nUSN: uuid:1234\r\n\r\n";
	assert_eq!(
		message::parse(peer(), packet).unwrap_err(),
		ParseError::UnknownNts(Some("ssdp:update".to_owned()))
	);

	let packet = b"NOTIFY * HTTP/1.1\r\nNT: urn:test:1\r\n\r\n";
	assert_eq!(message::parse(peer(), packet).unwrap_err(), ParseError::UnknownNts(None));
}

#[test]
fn test_search_round_trip() {
	let packet = message::build_search(SSDP_V4_ADDR, "urn:test:1", 3);
	let text = String::from_utf8(packet.clone()).unwrap();
	assert!(text.starts_with("M-SEARCH * HTTP/1.1\r\n"));
	assert!(text.contains("MAN: \"ssdp:discover\"\r\n"));

	let search = SearchMessage::parse(peer(), &packet).unwrap();
	assert_eq!(search.search_type(), "urn:test:1");
	assert_eq!(search.mx(), Some(3));
	assert_eq!(search.from(), peer());
}

#[test]
fn test_search_requires_discover_man() {
	let unquoted = b"M-SEARCH * HTTP/1.1\r\nMAN: ssdp:discover\r\nST: ssdp:all\r\nMX: 1\r\n\r\n";
	assert_eq!(
		SearchMessage::parse(peer(), unquoted).unwrap_err(),
		ParseError::UnexpectedMan(Some("ssdp:discover".to_owned()))
	);

	let missing = b"M-SEARCH * HTTP/1.1\r\nST: ssdp:all\r\nMX: 1\r\n\r\n";
	assert_eq!(SearchMessage::parse(peer(), missing).unwrap_err(), ParseError::UnexpectedMan(None));

	let bad_mx = b"M-SEARCH * HTTP/1.1\r\nMAN: \"ssdp:discover\"\r\nST: ssdp:all\r\nMX: soon\r\n\r\n";
	assert_eq!(
		SearchMessage::parse(peer(), bad_mx).unwrap_err(),
		ParseError::MalformedMx("soon".to_owned())
	);
}

#[test]
fn test_loose_parsing() {
	// Bare newlines, a junk header line and no terminating blank line
	let packet = b"M-SEARCH * HTTP/1.1\nMAN: \"ssdp:discover\"\nthis is not a header\nst: upnp:rootdevice";

	let search = SearchMessage::parse(peer(), packet).unwrap();
	assert_eq!(search.search_type(), ROOT_DEVICE);
	assert_eq!(search.mx(), None);
	assert_eq!(search.headers().len(), 2);
}

#[test]
fn test_unknown_method() {
	assert_eq!(
		message::parse(peer(), b"GET / HTTP/1.1\r\n\r\n").unwrap_err(),
		ParseError::UnknownMethod("GET / HTTP/1.1".to_owned())
	);

	assert_eq!(
		message::parse(peer(), b"NOTIFY *\r\nNTS: ssdp:alive\r\n\r\n").unwrap_err(),
		ParseError::MalformedStartLine("NOTIFY *".to_owned())
	);
}

#[test]
fn test_ok_round_trip() {
	let packet = message::build_ok("urn:test:1", "uuid:1234", "http://x/", "srv/1", 1800, None);
	let text = String::from_utf8(packet.clone()).unwrap();
	assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
	assert!(!text.contains("HOST"));

	let service = Service::parse(peer(), &packet).unwrap();
	assert_eq!(service.search_type(), "urn:test:1");
	assert_eq!(service.usn(), "uuid:1234");
	assert_eq!(service.location(), Some("http://x/"));
	assert_eq!(service.server(), Some("srv/1"));
	assert_eq!(service.max_age(), Some(1800));
	assert!(service.headers().contains("EXT"));
}

#[test]
fn test_ok_with_host() {
	let packet = message::build_ok("urn:test:1", "uuid:1234", "", "", 1800, Some(SSDP_V4_ADDR));
	let text = String::from_utf8(packet).unwrap();

	assert!(text.ends_with("HOST: 239.255.255.250:1900\r\n\r\n"));
}

#[test]
fn test_non_ok_response() {
	assert_eq!(
		Service::parse(peer(), b"HTTP/1.1 404 Not Found\r\n\r\n").unwrap_err(),
		ParseError::UnexpectedStatus(404)
	);
}

#[test]
fn test_search_matches() {
	assert!(message::search_matches("urn:test:1", "urn:test:1"));
	assert!(message::search_matches("urn:test:1", ALL));
	assert!(message::search_matches("urn:test:1", ROOT_DEVICE));
	assert!(!message::search_matches("urn:test:1", "urn:test:2"));
	assert!(!message::search_matches("urn:test:1", "URN:TEST:1"));
}

#[test]
fn test_header_case() {
	let packet = b"NOTIFY * HTTP/1.1\r\nnt: urn:test:1\r\nNts: ssdp:alive\r\nUsN: uuid:1234\r\nCache-Control: max-age=5\r\n\r\n";

	let alive = match message::parse(peer(), packet).unwrap() {
		Message::Alive(alive) => alive,
		message => panic!("expected alive, got {message:?}"),
	};

	assert_eq!(alive.usn(), "uuid:1234");
	assert_eq!(alive.max_age(), Some(5));
	assert_eq!(alive.headers().get("CACHE-CONTROL"), Some("max-age=5"));

	let names = alive.headers().iter().map(|(name, _)| name).collect::<Vec<_>>();
	assert_eq!(names, ["nt", "Nts", "UsN", "Cache-Control"]);
}

#[test]
fn test_resolver() {
	let resolver = AddrResolver::new("127.0.0.1:1900");
	assert_eq!(resolver.cached(), None);
	assert_eq!(resolver.resolve(), Ok(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 1900)));
	assert_eq!(resolver.cached(), Some(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 1900)));
	assert_eq!(resolver.resolve(), Ok(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 1900)));

	resolver.set_addr("127.0.0.1:1901");
	assert_eq!(resolver.addr(), "127.0.0.1:1901");
	assert_eq!(resolver.resolve(), Ok(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 1901)));

	resolver.set_addr("not an address");
	assert_eq!(resolver.cached(), None);
	assert!(matches!(resolver.resolve(), Err(ResolveError::InvalidAddress { .. })));

	resolver.set_addr("[::1]:1900");
	assert_eq!(resolver.resolve(), Err(ResolveError::NoIpv4Address("[::1]:1900".to_owned())));

	resolver.set_addr("");
	assert_eq!(resolver.resolve(), Ok(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0)));
}

#[test]
fn test_resolver_retries_failures() {
	let resolver = AddrResolver::new("not an address");
	assert!(resolver.resolve().is_err());
	assert!(resolver.resolve().is_err());
	assert_eq!(resolver.cached(), None);

	// A later success is cached as usual
	resolver.set_addr("127.0.0.1:1900");
	assert_eq!(resolver.resolve(), Ok(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 1900)));
	assert_eq!(resolver.cached(), Some(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 1900)));
}

#[test]
fn test_default_group() {
	assert_eq!(AddrResolver::new(DEFAULT_REMOTE_ADDR).resolve(), Ok(SSDP_V4_ADDR));
	assert_eq!(Options::default().remote_resolver().resolve(), Ok(SSDP_V4_ADDR));
}

#[test]
fn test_options_shared_resolvers() {
	let options = Options::new().remote_addr("127.0.0.1:1900");
	let clone = options.clone();

	options.remote_resolver().set_addr("127.0.0.1:1901");
	assert_eq!(clone.remote_resolver().resolve(), Ok(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 1901)));
}

#[test]
fn test_target_interface() {
	let lo = Ipv4Interface::new("lo", Ipv4Addr::LOCALHOST);

	let options = Options::new().interfaces(vec![lo.clone()]).only_system_interface();
	assert!(matches!(options.target_interface(), Err(ListenError::ConflictingInterfaces)));

	let options = Options::new().interfaces(vec![lo.clone()]);
	assert_eq!(options.target_interface().unwrap(), TargetInterface::Multi(vec![lo.clone()]));

	let options = Options::new().only_system_interface();
	assert_eq!(options.target_interface().unwrap(), TargetInterface::Default);

	let provided = lo.clone();
	let options = Options::new().interfaces(Vec::new()).interfaces_provider(move || vec![provided.clone()]);
	assert_eq!(options.target_interface().unwrap(), TargetInterface::Multi(vec![lo]));
}

#[test]
fn test_select_interfaces_by_name() {
	let lo = Ipv4Interface::new("lo", Ipv4Addr::LOCALHOST);
	let eth0 = Ipv4Interface::new("eth0", Ipv4Addr::new(192, 168, 1, 2));
	let ifaces = vec![lo.clone(), eth0.clone()];

	assert_eq!(select_by_name(ifaces.clone(), &["eth0"]).unwrap(), [eth0]);
	assert_eq!(select_by_name(ifaces.clone(), &["eth0", "lo"]).unwrap(), ifaces);

	let err = select_by_name(ifaces, &["lo", "wlan9"]).unwrap_err();
	assert!(matches!(err, ListenError::UnknownInterfaces(unknown) if unknown == ["wlan9"]));
}

#[test]
fn test_location() {
	assert_eq!(Location::from("http://x/").resolve(None, None), "http://x/");

	let location = Location::computed(|from, iface| match (from, iface) {
		(Some(from), _) => format!("http://{}/", from.ip()),
		(None, Some(iface)) => format!("http://{}/", iface.addr),
		(None, None) => "http://localhost/".to_owned(),
	});

	let lo = Ipv4Interface::new("lo", Ipv4Addr::LOCALHOST);
	assert_eq!(location.resolve(Some(peer()), None), "http://192.168.1.69/");
	assert_eq!(location.resolve(None, Some(&lo)), "http://127.0.0.1/");
	assert_eq!(location.resolve(None, None), "http://localhost/");
}

fn any_local() -> SocketAddrV4 {
	SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0)
}

#[test]
fn test_partial_join() {
	let bogus = Ipv4Interface::new("bogus", Ipv4Addr::new(192, 0, 2, 1));
	let lo = Ipv4Interface::new("lo", Ipv4Addr::LOCALHOST);

	let socket = MulticastSocket::open(any_local(), SSDP_V4_ADDR, TargetInterface::Multi(vec![bogus, lo.clone()]), 0).unwrap();
	assert_eq!(socket.interfaces(), [lo]);
	assert_eq!(socket.group(), SSDP_V4_ADDR);
}

#[test]
fn test_no_interfaces_joined() {
	let bogus = Ipv4Interface::new("bogus", Ipv4Addr::new(192, 0, 2, 1));

	let err = MulticastSocket::open(any_local(), SSDP_V4_ADDR, TargetInterface::Multi(vec![bogus]), 0)
		.err()
		.unwrap();
	assert!(matches!(err, ListenError::NoInterfacesJoined));
}

#[test]
fn test_socket_close() {
	let lo = Ipv4Interface::new("lo", Ipv4Addr::LOCALHOST);
	let socket = MulticastSocket::open(any_local(), SSDP_V4_ADDR, TargetInterface::Multi(vec![lo]), 0).unwrap();

	tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()
		.unwrap()
		.block_on(async move {
			let socket = socket.into_async().unwrap();

			let end = socket
				.read_packets(Some(Duration::from_millis(50)), |_, _| Ok::<_, std::io::Error>(()))
				.await
				.unwrap();
			assert_eq!(end, ReadEnd::TimedOut);

			let close = socket.close_signal();
			let reading = socket.read_packets(None, |_, _| Ok::<_, std::io::Error>(()));
			let closing = async move {
				tokio::time::sleep(Duration::from_millis(50)).await;
				close.close();
			};
			let (end, ()) = tokio::join!(reading, closing);
			assert_eq!(end.unwrap(), ReadEnd::Closed);

			let err = socket.send_to(b"hello".as_slice(), SSDP_V4_ADDR.into()).await.unwrap_err();
			assert_eq!(err.kind(), std::io::ErrorKind::NotConnected);
		});
}
