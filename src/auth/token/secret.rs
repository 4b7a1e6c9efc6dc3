//! Redacting wrapper for credential strings (API keys, scoped client tokens).

// self
use crate::_prelude::*;

/// Credential string that never prints its contents through `Debug` or `Display`.
///
/// Serialization is transparent so issued tokens can be returned to the frontend; only the
/// formatting paths used by logs are redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// API key issued by Boulevard for this integration.
pub type ApiKey = Secret;
