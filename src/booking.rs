//! Booking operations. Each validates its input, sends one fixed document through the
//! [`Gateway`](crate::gateway::Gateway), and reshapes the result for the frontend.

pub mod appointment;
pub mod cart;
pub mod client;
pub mod membership;
pub mod staff;

pub use appointment::*;
pub use cart::*;
pub use client::*;
pub use membership::*;
pub use staff::*;

// self
use crate::_prelude::*;

/// Operations accepted by the multiplexed booking endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BookingOperation {
	/// Five most recent appointments.
	GetAppointmentHistory,
	/// Active membership, if any.
	GetMembership,
	/// Open a cart at a location.
	CreateCart,
	/// Bookable times for a cart.
	GetAvailableTimes,
	/// Check a cart out.
	CompleteBooking,
}
impl BookingOperation {
	/// Returns the wire name used by the frontend.
	pub const fn as_str(self) -> &'static str {
		match self {
			BookingOperation::GetAppointmentHistory => "getAppointmentHistory",
			BookingOperation::GetMembership => "getMembership",
			BookingOperation::CreateCart => "createCart",
			BookingOperation::GetAvailableTimes => "getAvailableTimes",
			BookingOperation::CompleteBooking => "completeBooking",
		}
	}
}
impl Display for BookingOperation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for BookingOperation {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"getAppointmentHistory" => Ok(Self::GetAppointmentHistory),
			"getMembership" => Ok(Self::GetMembership),
			"createCart" => Ok(Self::CreateCart),
			"getAvailableTimes" => Ok(Self::GetAvailableTimes),
			"completeBooking" => Ok(Self::CompleteBooking),
			_ => Err(Error::invalid_request("Unknown operation")),
		}
	}
}

/// Returns `Some(trimmed)` for non-blank input.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn operation_names_round_trip() {
		for operation in [
			BookingOperation::GetAppointmentHistory,
			BookingOperation::GetMembership,
			BookingOperation::CreateCart,
			BookingOperation::GetAvailableTimes,
			BookingOperation::CompleteBooking,
		] {
			assert_eq!(operation.as_str().parse::<BookingOperation>().ok(), Some(operation));
		}
	}

	#[test]
	fn unknown_operation_is_a_client_error() {
		let err = "cancelEverything".parse::<BookingOperation>().expect_err("Unknown names fail.");

		assert!(err.is_client_error());
		assert_eq!(err.to_string(), "Unknown operation");
	}
}
