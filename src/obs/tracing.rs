// self
use crate::{_prelude::*, http::Method, obs::RequestKind};

/// Future returned by [`RequestSpan::instrument`].
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`RequestSpan::instrument`]; the input future itself without `tracing`.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// `verkada_api.request` span for one logical call, retries included.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Span carrying `kind`, `method`, and the URL path (never the query, which may hold ids).
	pub fn new(kind: RequestKind, method: Method, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			Self {
				span: tracing::debug_span!(
					"verkada_api.request",
					kind = kind.as_str(),
					method = method.as_str(),
					path
				),
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, method, path);

			Self {}
		}
	}

	/// Runs `fut` inside the span.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			tracing::Instrument::instrument(fut, self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrumented_futures_keep_their_output() {
		let span = RequestSpan::new(RequestKind::Token, Method::Post, "/token");

		assert_eq!(span.instrument(async { "tok" }).await, "tok");
	}
}
