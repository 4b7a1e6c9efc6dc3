// std
use std::time::Duration as StdDuration;
// self
use crate::obs::{OperationOutcome, OperationTarget};

#[cfg(feature = "metrics")]
const OPERATION_TOTAL: &str = "blvd_bff_operation_total";
#[cfg(feature = "metrics")]
const OPERATION_DURATION: &str = "blvd_bff_operation_duration_seconds";

pub(super) fn record_attempt(target: &OperationTarget) {
	count(target, OperationOutcome::Attempt);
}

/// Counts the final outcome and records how long the operation took.
pub(super) fn record_settled(target: &OperationTarget, outcome: OperationOutcome, elapsed: StdDuration) {
	count(target, outcome);

	#[cfg(feature = "metrics")]
	{
		metrics::histogram!(
			OPERATION_DURATION,
			"operation" => target.kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.record(elapsed.as_secs_f64());
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = elapsed;
	}
}

fn count(target: &OperationTarget, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			OPERATION_TOTAL,
			"operation" => target.kind.as_str(),
			"surface" => target.surface,
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (target, outcome);
	}
}
