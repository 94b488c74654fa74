// self
use crate::{_prelude::*, http::Method, obs::CallStage};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by the request pipeline.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided stage + HTTP method.
	pub fn new(stage: CallStage, method: Method) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"hotmart_client.call",
				stage = stage.as_str(),
				method = method.as_str()
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, method);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event when a rejected token is discarded.
pub fn trace_token_invalidated(generation: u64, status: u16) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(generation, status, "cached token invalidated");
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = (generation, status);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn call_span_builds_without_subscriber() {
		let _span = CallSpan::new(CallStage::Authenticate, Method::Post);

		trace_token_invalidated(1, 401);
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallStage::Request, Method::Get);
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
