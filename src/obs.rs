//! Observability hooks shared by the token manager, the request manager, and the paginator.
//!
//! With `tracing` (default) every call runs inside a `verkada_api.request` span and retries
//! log a warning. With `metrics` the crate feeds two series to the global recorder:
//! `verkada_api_request_total{kind, outcome}` and `verkada_api_retry_wait_seconds{kind}`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

macro_rules! def_label {
	($name:ident, $doc:literal { $($variant:ident => $label:literal, $vdoc:literal;)+ }) => {
		#[doc = $doc]
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
		pub enum $name {
			$(
				#[doc = $vdoc]
				$variant,
			)+
		}
		impl $name {
			/// Metric and span label.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $label,)+
				}
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
	};
}

def_label!(RequestKind, "What a request is for." {
	Token => "token", "Token or streaming JWT exchange.";
	Api => "api", "Resource endpoint call.";
	Page => "page", "One page of a paginated walk.";
});

def_label!(RequestOutcome, "Lifecycle step of a request." {
	Attempt => "attempt", "Sent over the wire.";
	Retry => "retry", "Failed transiently, another attempt follows.";
	Success => "success", "Completed.";
	Failure => "failure", "Error returned to the caller.";
});

/// Notes an upcoming retry: a warning inside the current span, the `retry` outcome, and the
/// planned wait.
pub fn record_retry(kind: RequestKind, retry: u32, wait: StdDuration) {
	#[cfg(feature = "tracing")]
	{
		::tracing::warn!(
			kind = kind.as_str(),
			retry,
			wait_ms = wait.as_millis() as u64,
			"Retrying."
		);
	}

	record_request_outcome(kind, RequestOutcome::Retry);
	record_retry_wait(kind, wait);
}
