// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Events counted per token manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenEvent {
	/// Call to the token endpoint started.
	Fetch,
	/// Token endpoint returned a usable token.
	Fetched,
	/// Token endpoint call failed.
	FetchFailed,
	/// Cached token handed out without a call.
	CacheHit,
}
impl TokenEvent {
	const COUNT: usize = 4;

	const fn slot(self) -> usize {
		match self {
			TokenEvent::Fetch => 0,
			TokenEvent::Fetched => 1,
			TokenEvent::FetchFailed => 2,
			TokenEvent::CacheHit => 3,
		}
	}
}

/// Copy of a manager's counters at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenMetricsSnapshot {
	/// Token endpoint calls.
	pub fetches: u64,
	/// Calls that produced a token.
	pub fetched: u64,
	/// Calls that failed.
	pub failed: u64,
	/// Tokens served from the cache.
	pub cache_hits: u64,
}

/// Lock-free counters owned by one [`TokenManager`](super::TokenManager).
#[derive(Debug, Default)]
pub struct TokenMetrics([AtomicU64; TokenEvent::COUNT]);
impl TokenMetrics {
	/// Token endpoint calls so far.
	pub fn attempts(&self) -> u64 {
		self.count(TokenEvent::Fetch)
	}

	/// Calls that produced a token.
	pub fn successes(&self) -> u64 {
		self.count(TokenEvent::Fetched)
	}

	/// Calls that failed.
	pub fn failures(&self) -> u64 {
		self.count(TokenEvent::FetchFailed)
	}

	/// Tokens served without a call.
	pub fn cache_hits(&self) -> u64 {
		self.count(TokenEvent::CacheHit)
	}

	/// Reads every counter.
	pub fn snapshot(&self) -> TokenMetricsSnapshot {
		TokenMetricsSnapshot {
			fetches: self.attempts(),
			fetched: self.successes(),
			failed: self.failures(),
			cache_hits: self.cache_hits(),
		}
	}

	pub(crate) fn record(&self, event: TokenEvent) {
		self.0[event.slot()].fetch_add(1, Ordering::Relaxed);
	}

	fn count(&self, event: TokenEvent) -> u64 {
		self.0[event.slot()].load(Ordering::Relaxed)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn snapshot_reflects_recorded_events() {
		let metrics = TokenMetrics::default();

		metrics.record(TokenEvent::Fetch);
		metrics.record(TokenEvent::Fetched);
		metrics.record(TokenEvent::CacheHit);
		metrics.record(TokenEvent::CacheHit);

		assert_eq!(
			metrics.snapshot(),
			TokenMetricsSnapshot { fetches: 1, fetched: 1, failed: 0, cache_hits: 2 }
		);
	}
}
