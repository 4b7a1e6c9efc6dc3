// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	obs::{OperationOutcome, OperationTarget},
};

#[cfg(feature = "tracing")]
pub(super) type OperationSpan = tracing::Span;
#[cfg(not(feature = "tracing"))]
#[derive(Clone, Debug)]
pub(super) struct OperationSpan;

#[cfg(feature = "tracing")]
pub(super) type Instrumented<F> = tracing::instrument::Instrumented<F>;
#[cfg(not(feature = "tracing"))]
pub(super) type Instrumented<F> = F;

pub(super) fn operation_span(target: &OperationTarget) -> OperationSpan {
	#[cfg(feature = "tracing")]
	{
		tracing::info_span!(
			"blvd_bff.operation",
			operation = target.kind.as_str(),
			document = target.document,
			surface = target.surface,
			outcome = tracing::field::Empty,
			elapsed_ms = tracing::field::Empty
		)
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = target;

		OperationSpan
	}
}

/// Attaches `span` to `fut` without holding a guard across `.await` points.
pub(super) fn instrument<F>(span: &OperationSpan, fut: F) -> Instrumented<F>
where
	F: Future,
{
	#[cfg(feature = "tracing")]
	{
		use tracing::Instrument;

		fut.instrument(span.clone())
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = span;

		fut
	}
}

pub(super) fn in_scope<T, F>(span: &OperationSpan, op: F) -> T
where
	F: FnOnce() -> T,
{
	#[cfg(feature = "tracing")]
	{
		span.in_scope(op)
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = span;

		op()
	}
}

pub(super) fn record_settled(span: &OperationSpan, outcome: OperationOutcome, elapsed: StdDuration) {
	#[cfg(feature = "tracing")]
	{
		span.record("outcome", outcome.as_str());
		span.record("elapsed_ms", u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (span, outcome, elapsed);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{graphql, obs::OperationKind};

	fn span() -> OperationSpan {
		operation_span(&OperationTarget::remote(OperationKind::CreateCart, &graphql::CREATE_CART))
	}

	#[tokio::test]
	async fn instrumented_futures_keep_their_output() {
		let span = span();

		assert_eq!(instrument(&span, async { 42 }).await, 42);

		record_settled(&span, OperationOutcome::Success, StdDuration::from_millis(5));
	}

	#[test]
	fn in_scope_returns_the_closure_value() {
		assert_eq!(in_scope(&span(), || "scoped"), "scoped");
	}
}
