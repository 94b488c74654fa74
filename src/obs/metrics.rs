// self
use crate::obs::{CallOutcome, CallStage};

/// Records a pipeline outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(stage: CallStage, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"hotmart_client_call_total",
			"stage" => stage.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (stage, outcome);
	}
}

/// Records a token invalidation via the global metrics recorder (when enabled).
pub fn record_token_invalidated() {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("hotmart_client_token_invalidated_total").increment(1);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_metrics() {
		record_call_outcome(CallStage::Request, CallOutcome::Failure);
		record_token_invalidated();
	}
}
