//! Crate-level error types shared by the token generator, gateway, and booking operations.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const BODY_PREVIEW_LEN: usize = 256;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Upstream GraphQL endpoint answered with a failure.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Caller-supplied identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::auth::IdentifierError),

	/// Caller-supplied request is incomplete or malformed.
	#[error("{reason}")]
	InvalidRequest {
		/// Human-readable reason returned to the caller.
		reason: String,
	},
}
impl Error {
	/// Builds an [`Error::InvalidRequest`] from any displayable reason.
	pub fn invalid_request(reason: impl Into<String>) -> Self {
		Self::InvalidRequest { reason: reason.into() }
	}

	/// Returns `true` when the failure was caused by the caller's input rather than by this
	/// service or the upstream platform.
	pub fn is_client_error(&self) -> bool {
		matches!(self, Self::InvalidRequest { .. } | Self::Identifier(_))
	}
}

/// Configuration and validation failures raised while assembling process-wide settings.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Required environment variable is absent or empty.
	#[error("Missing required configuration value `{key}`.")]
	MissingValue {
		/// Variable name.
		key: &'static str,
	},
	/// Signing key is not valid base64.
	#[error("Signing key is not valid base64.")]
	InvalidSigningKey {
		/// Underlying decoding failure.
		#[source]
		source: base64::DecodeError,
	},
	/// HMAC could not be keyed with the configured signing key.
	#[error("Signing key cannot be used as an HMAC key.")]
	UnusableSigningKey,
	/// Endpoint URL cannot be parsed.
	#[error("Configuration value `{key}` is not a valid URL.")]
	InvalidUrl {
		/// Variable name.
		key: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Identifier in configuration failed validation.
	#[error("Configuration value `{key}` is not a valid identifier.")]
	InvalidIdentifier {
		/// Variable name.
		key: &'static str,
		/// Underlying validation failure.
		#[source]
		source: crate::auth::IdentifierError,
	},
	/// Listener address cannot be parsed.
	#[error("Configuration value `{key}` is not a valid socket address: {value}.")]
	InvalidBindAddress {
		/// Variable name.
		key: &'static str,
		/// Rejected value.
		value: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures reported by the upstream GraphQL endpoint.
#[derive(Debug, ThisError)]
pub enum UpstreamError {
	/// Endpoint answered with a non-success HTTP status.
	#[error("HTTP {status}: {body_preview}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Leading slice of the response body.
		body_preview: String,
	},
	/// Endpoint responded with JSON that does not match the expected shape.
	#[error("GraphQL endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// GraphQL `errors` array was non-empty; carries the first message.
	#[error("{message}")]
	Graphql {
		/// First error message reported by the endpoint.
		message: String,
	},
	/// Response carried neither `data` nor `errors`.
	#[error("GraphQL endpoint returned no data for `{operation}`.")]
	MissingData {
		/// Operation name of the document sent.
		operation: &'static str,
	},
	/// Timestamp reported by the endpoint is not RFC 3339.
	#[error("GraphQL endpoint returned an invalid timestamp `{value}`.")]
	InvalidTimestamp {
		/// Rejected value.
		value: String,
	},
}
impl UpstreamError {
	/// Builds an [`UpstreamError::Status`] with a bounded preview of `body`.
	pub fn status(status: u16, body: &[u8]) -> Self {
		let text = String::from_utf8_lossy(body);
		let body_preview = match text.char_indices().nth(BODY_PREVIEW_LEN) {
			Some((idx, _)) => format!("{}…", &text[..idx]),
			None => text.into_owned(),
		};

		Self::Status { status, body_preview }
	}
}

/// Transport-level failures reaching the GraphQL endpoint.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the GraphQL endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_preview_truncates_long_bodies() {
		let body = "x".repeat(BODY_PREVIEW_LEN + 10);
		let UpstreamError::Status { status, body_preview } =
			UpstreamError::status(502, body.as_bytes())
		else {
			panic!("Status constructor must build the Status variant.");
		};

		assert_eq!(status, 502);
		assert_eq!(body_preview.chars().count(), BODY_PREVIEW_LEN + 1);
		assert!(body_preview.ends_with('…'));
	}

	#[test]
	fn client_errors_are_classified() {
		assert!(Error::invalid_request("Client ID required").is_client_error());
		assert!(!Error::from(ConfigError::MissingValue { key: "BOULEVARD_API_KEY" }).is_client_error());
		assert!(
			!Error::from(UpstreamError::Graphql { message: "Not found".into() }).is_client_error()
		);
	}
}
