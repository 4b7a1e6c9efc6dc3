//! Optional observability for gateway operations.
//!
//! Every operation runs through [`observe`], or [`observe_local`] when it never leaves the
//! process. Both own the span and the metric updates for the call.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap each operation in a `blvd_bff.operation` span carrying the
//!   `operation`, `document` and `surface` fields. `outcome` and `elapsed_ms` are recorded once
//!   the operation settles.
//! - Enable `metrics` to increment `blvd_bff_operation_total` (labeled by `operation`, `surface`
//!   and `outcome`) and to record `blvd_bff_operation_duration_seconds` (labeled by `operation`
//!   and `outcome`).

mod metrics;
mod tracing;

// std
use std::time::Instant;
// self
use crate::{_prelude::*, graphql::Document};

/// Operations the service performs against Boulevard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Local scoped token generation.
	IssueToken,
	/// Platform-side client token creation.
	AuthenticateClient,
	/// Client search by email or phone.
	LookupClient,
	/// Client creation.
	CreateClient,
	/// Appointment history of a client.
	AppointmentHistory,
	/// Active membership of a client.
	Membership,
	/// Cart creation.
	CreateCart,
	/// Bookable times of a cart.
	AvailableTimes,
	/// Cart checkout.
	CompleteBooking,
	/// Staff listing.
	Staff,
	/// Monthly slot availability.
	Availability,
	/// Appointment creation.
	CreateAppointment,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::IssueToken => "issue_token",
			OperationKind::AuthenticateClient => "authenticate_client",
			OperationKind::LookupClient => "lookup_client",
			OperationKind::CreateClient => "create_client",
			OperationKind::AppointmentHistory => "appointment_history",
			OperationKind::Membership => "membership",
			OperationKind::CreateCart => "create_cart",
			OperationKind::AvailableTimes => "available_times",
			OperationKind::CompleteBooking => "complete_booking",
			OperationKind::Staff => "staff",
			OperationKind::Availability => "availability",
			OperationKind::CreateAppointment => "create_appointment",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Labels shared by the span and the metrics of one operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OperationTarget {
	kind: OperationKind,
	document: &'static str,
	surface: &'static str,
}
impl OperationTarget {
	const LOCAL: &'static str = "local";

	fn remote(kind: OperationKind, document: &Document) -> Self {
		Self { kind, document: document.name, surface: document.surface.as_str() }
	}

	fn local(kind: OperationKind) -> Self {
		Self { kind, document: Self::LOCAL, surface: Self::LOCAL }
	}
}

/// Runs `fut`, the operation built around `document`, inside its span.
pub(crate) async fn observe<T, Fut>(kind: OperationKind, document: &Document, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let target = OperationTarget::remote(kind, document);
	let span = self::tracing::operation_span(&target);

	self::metrics::record_attempt(&target);

	let started = Instant::now();
	let result = self::tracing::instrument(&span, fut).await;

	settle(&target, &span, started, &result);

	result
}

/// Runs a synchronous in-process operation inside its span.
pub(crate) fn observe_local<T, F>(kind: OperationKind, op: F) -> Result<T>
where
	F: FnOnce() -> Result<T>,
{
	let target = OperationTarget::local(kind);
	let span = self::tracing::operation_span(&target);

	self::metrics::record_attempt(&target);

	let started = Instant::now();
	let result = self::tracing::in_scope(&span, op);

	settle(&target, &span, started, &result);

	result
}

fn settle<T>(
	target: &OperationTarget,
	span: &self::tracing::OperationSpan,
	started: Instant,
	result: &Result<T>,
) {
	let outcome = if result.is_ok() { OperationOutcome::Success } else { OperationOutcome::Failure };
	let elapsed = started.elapsed();

	self::tracing::record_settled(span, outcome, elapsed);
	self::metrics::record_settled(target, outcome, elapsed);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::graphql;

	#[test]
	fn targets_carry_document_and_surface() {
		assert_eq!(
			OperationTarget::remote(OperationKind::LookupClient, &graphql::FIND_CLIENT),
			OperationTarget { kind: OperationKind::LookupClient, document: "FindClient", surface: "admin" }
		);
		assert_eq!(
			OperationTarget::remote(OperationKind::CreateCart, &graphql::CREATE_CART).surface,
			"client"
		);
		assert_eq!(OperationTarget::local(OperationKind::IssueToken).document, "local");
	}

	#[tokio::test]
	async fn observe_returns_the_operation_result() {
		let ok = observe(OperationKind::Staff, &graphql::LOCATION_STAFF, async { Ok(3) }).await;

		assert_eq!(ok.ok(), Some(3));

		let err = observe(OperationKind::Staff, &graphql::LOCATION_STAFF, async {
			Err::<(), _>(Error::invalid_request("Location required"))
		})
		.await
		.expect_err("Failures propagate unchanged.");

		assert_eq!(err.to_string(), "Location required");
	}

	#[test]
	fn observe_local_runs_the_operation_once() {
		let mut calls = 0;
		let value = observe_local(OperationKind::IssueToken, || {
			calls += 1;

			Ok("token")
		})
		.expect("Local operations return their value.");

		assert_eq!((value, calls), ("token", 1));
	}
}
