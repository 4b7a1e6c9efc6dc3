//! Scoped client tokens for Boulevard's client API.
//!
//! A token is `base64(HMAC-SHA256(key, payload)) || payload` where the payload is
//! `"blvd-client-v1" || business_id || client_id || unix_seconds`. Fields are concatenated
//! without delimiters, so the upstream verifier relies on positional parsing; identifiers
//! that are prefixes of one another can produce identical payloads. The layout is kept as-is
//! for wire compatibility.
//!
//! This crate only mints tokens. Validity, including how old a timestamp may be, is decided by
//! Boulevard.

pub mod secret;
pub mod signing_key;

pub use secret::*;
pub use signing_key::*;

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	auth::{BusinessId, ClientId},
	error::ConfigError,
};

type HmacSha256 = Hmac<Sha256>;

/// Protocol tag that opens every scoped token payload.
pub const CLIENT_TOKEN_PREFIX: &str = "blvd-client-v1";
/// Length of the base64 signature that prefixes every token (32-byte digest, padded).
pub const SIGNATURE_LEN: usize = 44;

/// Unsigned token payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenPayload<'a> {
	/// Business the client belongs to.
	pub business_id: &'a BusinessId,
	/// Client the token is scoped to.
	pub client_id: &'a ClientId,
	/// Issue time in whole Unix seconds.
	pub timestamp: i64,
}
impl Display for TokenPayload<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{CLIENT_TOKEN_PREFIX}{}{}{}", self.business_id, self.client_id, self.timestamp)
	}
}

/// Scoped bearer credential presented to the client API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientToken(Secret);
impl ClientToken {
	/// Wraps a token received from the frontend or from the upstream platform.
	pub fn new(value: impl Into<String>) -> Self {
		Self(Secret::new(value))
	}

	/// Returns the raw token string. Callers must avoid logging this value.
	pub fn expose(&self) -> &str {
		self.0.expose()
	}
}
impl Debug for ClientToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ClientToken").field(&"<redacted>").finish()
	}
}

/// Mints [`ClientToken`]s from process-wide configuration borrowed by reference.
///
/// The issuer holds no state of its own; calls are independent and safe to run concurrently.
/// Two calls within the same second for the same client return identical tokens because the
/// scheme carries no nonce.
#[derive(Clone, Copy, Debug)]
pub struct ClientTokenIssuer<'a> {
	business_id: &'a BusinessId,
	signing_key: &'a SigningKey,
}
impl<'a> ClientTokenIssuer<'a> {
	/// Binds an issuer to the business identifier and decoded signing key.
	pub fn new(business_id: &'a BusinessId, signing_key: &'a SigningKey) -> Self {
		Self { business_id, signing_key }
	}

	/// Issues a token stamped with the current wall-clock second.
	pub fn issue(&self, client_id: &ClientId) -> Result<ClientToken, ConfigError> {
		self.issue_at(client_id, OffsetDateTime::now_utc())
	}

	/// Issues a token stamped with `issued_at`, truncated to whole seconds.
	pub fn issue_at(
		&self,
		client_id: &ClientId,
		issued_at: OffsetDateTime,
	) -> Result<ClientToken, ConfigError> {
		let payload = TokenPayload {
			business_id: self.business_id,
			client_id,
			timestamp: issued_at.unix_timestamp(),
		}
		.to_string();
		let mut mac = HmacSha256::new_from_slice(self.signing_key.as_bytes())
			.map_err(|_| ConfigError::UnusableSigningKey)?;

		mac.update(payload.as_bytes());

		let mut token = STANDARD.encode(mac.finalize().into_bytes());

		token.push_str(&payload);

		Ok(ClientToken::new(token))
	}
}
