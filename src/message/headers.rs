#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The headers of an SSDP message, in the order they were received.
///
/// Lookups ignore ASCII case; names keep the casing they were sent with.
pub struct Headers(Vec<(String, String)>);
impl Headers {
	#[inline(always)]
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// The value of the first header called `name`, ignoring ASCII case.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(header, _)| header.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	#[inline(always)]
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Iterates over `(name, value)` pairs as they were received.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
	}

	#[inline(always)]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[inline(always)]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[inline(always)]
	pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.0.push((name.into(), value.into()));
	}
}
