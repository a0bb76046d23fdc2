use crate::util::is_word_byte;

const MAX_AGE: &[u8] = b"max-age";

/// Extracts the `max-age` directive from a `CACHE-CONTROL` header value.
///
/// The directive may appear anywhere in a `;` or `,` separated list, with any amount of whitespace
/// around the `=`. A name that merely ends in `max-age` (such as `foomax-age`) does not count.
///
/// Returns `default` when there is no such directive or its value is not a non-negative integer
/// that fits in a `u32`.
pub fn extract_max_age(value: &str, default: Option<u32>) -> Option<u32> {
	let bytes = value.as_bytes();

	let mut start = 0;
	while let Some(offset) = find_ignore_ascii_case(&bytes[start..], MAX_AGE) {
		let at = start + offset;
		start = at + 1;

		if at > 0 && is_word_byte(bytes[at - 1]) {
			continue;
		}

		if let Some(digits) = directive_digits(&bytes[at + MAX_AGE.len()..]) {
			return std::str::from_utf8(digits)
				.ok()
				.and_then(|digits| digits.parse::<u32>().ok())
				.or(default);
		}
	}

	default
}

/// Matches `<ws>=<ws><digits>` at the start of `rest`, where the digits end at a word boundary.
fn directive_digits(rest: &[u8]) -> Option<&[u8]> {
	let rest = match trim_start_whitespace(rest).split_first() {
		Some((&b'=', rest)) => trim_start_whitespace(rest),
		_ => return None,
	};

	let len = rest.iter().take_while(|byte| byte.is_ascii_digit()).count();
	if len == 0 || rest.get(len).is_some_and(|&byte| is_word_byte(byte)) {
		return None;
	}

	Some(&rest[..len])
}

#[inline(always)]
fn trim_start_whitespace(bytes: &[u8]) -> &[u8] {
	let skip = bytes.iter().take_while(|byte| byte.is_ascii_whitespace()).count();
	&bytes[skip..]
}

#[inline(always)]
fn find_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	haystack.windows(needle.len()).position(|window| window.eq_ignore_ascii_case(needle))
}
