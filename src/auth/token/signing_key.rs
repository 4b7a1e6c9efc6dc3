//! Raw HMAC key material decoded from the base64 secret supplied by Boulevard.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, error::ConfigError};

/// Decoded signing key used to sign scoped client tokens.
///
/// The configured secret is base64 text; the HMAC is keyed with the decoded bytes, never with the
/// UTF-8 text itself. A zero-length key is accepted because HMAC is defined for short keys.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);
impl SigningKey {
	/// Decodes a standard-alphabet base64 secret.
	pub fn from_base64(encoded: &str) -> Result<Self, ConfigError> {
		STANDARD
			.decode(encoded.trim())
			.map(Self)
			.map_err(|source| ConfigError::InvalidSigningKey { source })
	}

	/// Wraps raw key bytes.
	pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
		Self(bytes.into())
	}

	/// Returns the raw key bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}
}
impl Debug for SigningKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SigningKey").field("len", &self.0.len()).finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn decodes_base64_into_raw_bytes() {
		let key = SigningKey::from_base64("Ymx2ZC10ZXN0LXNpZ25pbmcta2V5LTAxMjM0NTY3ODk=")
			.expect("Fixture key should decode.");

		assert_eq!(key.as_bytes(), b"blvd-test-signing-key-0123456789");
	}

	#[test]
	fn rejects_malformed_base64() {
		let err = SigningKey::from_base64("your-secret-key-here!")
			.expect_err("Non-base64 input must be rejected.");

		assert!(matches!(err, ConfigError::InvalidSigningKey { .. }));
	}

	#[test]
	fn empty_secret_yields_empty_key() {
		assert!(SigningKey::from_base64("").expect("Empty input is valid base64.").as_bytes().is_empty());
	}

	#[test]
	fn debug_hides_key_material() {
		let key = SigningKey::from_bytes(b"hunter2".to_vec());

		assert_eq!(format!("{key:?}"), "SigningKey { len: 7, .. }");
	}
}
