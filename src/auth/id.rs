//! Strongly typed Boulevard identifiers validated at the edge of the service.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $kind:literal, $rule:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Label used in validation messages, e.g. `"Client ID required"`.
			pub const KIND: &'static str = $kind;

			/// Checks `value` against this kind's rule and wraps it.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				IdRule::$rule.check($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!(stringify!($name), "({:?})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

const REFERENCE_MAX_LEN: usize = 128;
const LOCATION_URN_PREFIX: &str = "urn:blvd:Location:";

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} ID required")]
	Empty {
		/// Kind of identifier (client, business, location, cart, staff).
		kind: &'static str,
	},
	/// A reference identifier contains whitespace characters.
	#[error("{kind} ID contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (location, cart, staff).
		kind: &'static str,
	},
	/// A reference identifier exceeded the allowed character count.
	#[error("{kind} ID exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (location, cart, staff).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Validation applied by an identifier kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IdRule {
	/// Any non-empty string. Token payload parts are signed verbatim.
	Present,
	/// Non-empty, no whitespace, at most [`REFERENCE_MAX_LEN`] characters. Used for ids that
	/// only ever come back from Boulevard and are echoed into GraphQL variables.
	Reference,
}
impl IdRule {
	fn check(self, kind: &'static str, value: &str) -> Result<(), IdentifierError> {
		if value.is_empty() {
			return Err(IdentifierError::Empty { kind });
		}
		if self == IdRule::Present {
			return Ok(());
		}
		if value.chars().any(char::is_whitespace) {
			return Err(IdentifierError::ContainsWhitespace { kind });
		}
		if value.chars().count() > REFERENCE_MAX_LEN {
			return Err(IdentifierError::TooLong { kind, max: REFERENCE_MAX_LEN });
		}

		Ok(())
	}
}

def_id! { ClientId, "Client", Present, "Boulevard client identifier, signed verbatim into scoped tokens." }
def_id! { BusinessId, "Business", Present, "Boulevard business identifier embedded in every scoped token." }
def_id! { LocationId, "Location", Reference, "Boulevard location identifier (bare UUID or `urn:blvd:Location:` URN)." }
def_id! { CartId, "Cart", Reference, "Identifier of a cart opened on the client API." }
def_id! { StaffId, "Staff", Reference, "Boulevard staff member identifier." }

impl LocationId {
	/// Returns the identifier in URN form, prefixing bare identifiers with
	/// `urn:blvd:Location:`.
	pub fn to_urn(&self) -> String {
		if self.0.starts_with(LOCATION_URN_PREFIX) {
			self.0.clone()
		} else {
			format!("{LOCATION_URN_PREFIX}{}", self.0)
		}
	}
}
