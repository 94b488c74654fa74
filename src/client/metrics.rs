// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for the request pipeline.
#[derive(Debug, Default)]
pub struct ClientMetrics {
	authentications: AtomicU64,
	authentication_failures: AtomicU64,
	requests: AtomicU64,
	invalidations: AtomicU64,
}
impl ClientMetrics {
	/// Returns the number of token exchanges sent to the authentication endpoint.
	pub fn authentications(&self) -> u64 {
		self.authentications.load(Ordering::Relaxed)
	}

	/// Returns the number of token exchanges that failed.
	pub fn authentication_failures(&self) -> u64 {
		self.authentication_failures.load(Ordering::Relaxed)
	}

	/// Returns the number of API requests handed to the transport.
	pub fn requests(&self) -> u64 {
		self.requests.load(Ordering::Relaxed)
	}

	/// Returns the number of times a 401 discarded the cached token.
	pub fn invalidations(&self) -> u64 {
		self.invalidations.load(Ordering::Relaxed)
	}

	pub(crate) fn record_authentication(&self) {
		self.authentications.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_authentication_failure(&self) {
		self.authentication_failures.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_request(&self) {
		self.requests.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_invalidation(&self) {
		self.invalidations.fetch_add(1, Ordering::Relaxed);
	}
}
