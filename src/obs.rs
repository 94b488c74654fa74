//! Optional observability helpers for the request pipeline.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `hotmart_client.call` with the `stage`
//!   (authenticate/request) and `method` fields, plus a `debug` event whenever a 401 discards the
//!   cached token.
//! - Enable `metrics` to increment the `hotmart_client_call_total` counter for every
//!   attempt/success/failure, labeled by `stage` + `outcome`, and
//!   `hotmart_client_token_invalidated_total` for every discarded token.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, http::Method};

/// Runs `fut` inside a call span and records the attempt plus its final outcome.
pub async fn observe_call<T, Fut>(stage: CallStage, method: Method, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	record_call_outcome(stage, CallOutcome::Attempt);

	let result = CallSpan::new(stage, method).instrument(fut).await;

	record_call_outcome(stage, CallOutcome::of(&result));

	result
}

/// Reports a 401-driven token invalidation to every enabled backend.
pub fn token_invalidated(generation: u64, status: u16) {
	record_token_invalidated();
	trace_token_invalidated(generation, status);
}

/// Pipeline stages observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallStage {
	/// Client-credentials exchange against the authentication endpoint.
	Authenticate,
	/// Authenticated API request.
	Request,
}
impl CallStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallStage::Authenticate => "authenticate",
			CallStage::Request => "request",
		}
	}
}
impl Display for CallStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a pipeline stage.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Classifies a finished call.
	pub fn of<T>(result: &Result<T>) -> Self {
		if result.is_ok() { Self::Success } else { Self::Failure }
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
