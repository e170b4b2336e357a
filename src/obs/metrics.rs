// self
use crate::{
	_prelude::*,
	obs::{RequestKind, RequestOutcome},
};

/// Bumps `verkada_api_request_total` for `kind` and `outcome`.
pub fn record_request_outcome(kind: RequestKind, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"verkada_api_request_total",
			"kind" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Feeds a planned backoff into `verkada_api_retry_wait_seconds`.
pub fn record_retry_wait(kind: RequestKind, wait: StdDuration) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!("verkada_api_retry_wait_seconds", "kind" => kind.as_str())
			.record(wait.as_secs_f64());
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, wait);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recording_without_a_recorder_is_harmless() {
		record_request_outcome(RequestKind::Page, RequestOutcome::Attempt);
		record_retry_wait(RequestKind::Api, StdDuration::from_millis(250));
	}
}
