use std::collections::BTreeSet;

/// Names of the interfaces that are administratively up.
#[cfg(unix)]
pub fn ifaces_up() -> Result<BTreeSet<String>, std::io::Error> {
	use std::ffi::CStr;

	let mut ifaddrs: *mut libc::ifaddrs = std::ptr::null_mut();
	if unsafe { libc::getifaddrs(&mut ifaddrs) } != 0 {
		return Err(std::io::Error::last_os_error());
	}

	let mut up = BTreeSet::new();
	let mut cursor = ifaddrs;
	while !cursor.is_null() {
		let entry = unsafe { &*cursor };
		if !entry.ifa_name.is_null() && entry.ifa_flags & (libc::IFF_UP as libc::c_uint) != 0 {
			let name = unsafe { CStr::from_ptr(entry.ifa_name) };
			up.insert(name.to_string_lossy().into_owned());
		}
		cursor = entry.ifa_next;
	}

	unsafe { libc::freeifaddrs(ifaddrs) };

	Ok(up)
}

/// Names of the interfaces that are administratively up.
///
/// The adapter list only reports interfaces that are configured, so every one of them counts as up.
#[cfg(not(unix))]
pub fn ifaces_up() -> Result<BTreeSet<String>, std::io::Error> {
	Ok(if_addrs::get_if_addrs()?.into_iter().map(|iface| iface.name).collect())
}

/// Whether `byte` can be part of a word, in the regex `\b` sense.
#[inline(always)]
pub fn is_word_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_'
}
