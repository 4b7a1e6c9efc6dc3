//! Process-wide Boulevard configuration, built once at startup and shared by reference.

// self
use crate::{
	_prelude::*,
	auth::{ApiKey, BusinessId, ClientTokenIssuer, SigningKey},
	error::ConfigError,
};

/// Environment variable holding the Boulevard API key.
pub const ENV_API_KEY: &str = "BOULEVARD_API_KEY";
/// Environment variable holding the base64 signing secret.
pub const ENV_SECRET_KEY: &str = "BOULEVARD_SECRET_KEY";
/// Environment variable holding the business identifier.
pub const ENV_BUSINESS_ID: &str = "BOULEVARD_BUSINESS_ID";
/// Environment variable overriding the versioned API root.
pub const ENV_API_URL: &str = "BOULEVARD_API_URL";
/// Environment variable overriding the admin endpoint.
pub const ENV_ADMIN_API_URL: &str = "BOULEVARD_ADMIN_API_URL";
/// Environment variable overriding the client endpoint.
pub const ENV_CLIENT_API_URL: &str = "BOULEVARD_CLIENT_API_URL";
/// Versioned API root used when [`ENV_API_URL`] is unset.
pub const DEFAULT_API_URL: &str = "https://dashboard.boulevard.io/api/2020-01";

/// GraphQL endpoints exposed by Boulevard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
	/// Business-wide admin API.
	pub admin: Url,
	/// Client-scoped API for the configured business.
	pub client: Url,
}
impl Endpoints {
	/// Derives both endpoints from a versioned API root such as
	/// `https://dashboard.boulevard.io/api/2020-01`.
	pub fn from_api_root(root: &Url, business_id: &BusinessId) -> Result<Self, url::ParseError> {
		let root = root.as_str().trim_end_matches('/');

		Ok(Self {
			admin: Url::parse(&format!("{root}/admin"))?,
			client: Url::parse(&format!("{root}/{business_id}/client"))?,
		})
	}
}

/// Immutable configuration for the Boulevard integration.
#[derive(Clone, Debug)]
pub struct BoulevardConfig {
	/// API key sent as the Basic-auth username.
	pub api_key: ApiKey,
	/// Business the integration acts for.
	pub business_id: BusinessId,
	/// Decoded HMAC key for scoped client tokens.
	pub signing_key: SigningKey,
	/// Upstream GraphQL endpoints.
	pub endpoints: Endpoints,
}
impl BoulevardConfig {
	/// Loads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Loads the configuration from an arbitrary key lookup.
	///
	/// Empty values count as missing. There are no built-in fallbacks for credentials.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |key: &'static str| lookup(key).filter(|value| !value.trim().is_empty());
		let require = |key: &'static str| read(key).ok_or(ConfigError::MissingValue { key });
		let parse_url = |key: &'static str, raw: &str| {
			Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { key, source })
		};
		let api_key = ApiKey::new(require(ENV_API_KEY)?.trim());
		let business_id = BusinessId::new(require(ENV_BUSINESS_ID)?.trim())
			.map_err(|source| ConfigError::InvalidIdentifier { key: ENV_BUSINESS_ID, source })?;
		let signing_key = SigningKey::from_base64(&require(ENV_SECRET_KEY)?)?;
		let root = parse_url(ENV_API_URL, &read(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.into()))?;
		let mut endpoints = Endpoints::from_api_root(&root, &business_id)
			.map_err(|source| ConfigError::InvalidUrl { key: ENV_API_URL, source })?;

		if let Some(raw) = read(ENV_ADMIN_API_URL) {
			endpoints.admin = parse_url(ENV_ADMIN_API_URL, &raw)?;
		}
		if let Some(raw) = read(ENV_CLIENT_API_URL) {
			endpoints.client = parse_url(ENV_CLIENT_API_URL, &raw)?;
		}

		Ok(Self { api_key, business_id, signing_key, endpoints })
	}

	/// Returns a token issuer bound to this configuration.
	pub fn token_issuer(&self) -> ClientTokenIssuer<'_> {
		ClientTokenIssuer::new(&self.business_id, &self.signing_key)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const BUSINESS: &str = "f6a06736-1132-4365-b79a-a69c648a746a";

	fn lookup_from(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<&'static str, &'static str> = pairs.iter().copied().collect();

		move |key| map.get(key).map(|value| (*value).to_owned())
	}

	fn required() -> Vec<(&'static str, &'static str)> {
		vec![
			(ENV_API_KEY, "93ca3f15-6f0e-491d-840b-681a0fef80ed"),
			(ENV_SECRET_KEY, "Ymx2ZC10ZXN0LXNpZ25pbmcta2V5LTAxMjM0NTY3ODk="),
			(ENV_BUSINESS_ID, BUSINESS),
		]
	}

	#[test]
	fn derives_default_endpoints_from_business() {
		let config =
			BoulevardConfig::from_lookup(lookup_from(&required())).expect("Config should load.");

		assert_eq!(config.endpoints.admin.as_str(), "https://dashboard.boulevard.io/api/2020-01/admin");
		assert_eq!(
			config.endpoints.client.as_str(),
			format!("https://dashboard.boulevard.io/api/2020-01/{BUSINESS}/client")
		);
		assert_eq!(config.signing_key.as_bytes(), b"blvd-test-signing-key-0123456789");
		assert_eq!(config.api_key.expose(), "93ca3f15-6f0e-491d-840b-681a0fef80ed");
	}

	#[test]
	fn explicit_endpoints_override_derived_ones() {
		let mut pairs = required();

		pairs.push((ENV_API_URL, "https://sandbox.joinblvd.com/api/2020-01/"));
		pairs.push((ENV_ADMIN_API_URL, "http://127.0.0.1:9000/admin"));

		let config = BoulevardConfig::from_lookup(lookup_from(&pairs)).expect("Config should load.");

		assert_eq!(config.endpoints.admin.as_str(), "http://127.0.0.1:9000/admin");
		assert_eq!(
			config.endpoints.client.as_str(),
			format!("https://sandbox.joinblvd.com/api/2020-01/{BUSINESS}/client")
		);
	}

	#[test]
	fn missing_or_blank_credentials_are_fatal() {
		for key in [ENV_API_KEY, ENV_SECRET_KEY, ENV_BUSINESS_ID] {
			let pairs = required().into_iter().filter(|(k, _)| *k != key).collect::<Vec<_>>();
			let err = BoulevardConfig::from_lookup(lookup_from(&pairs))
				.expect_err("Missing credentials must fail.");

			assert!(matches!(err, ConfigError::MissingValue { key: missing } if missing == key));
		}

		let mut pairs = required();

		pairs.retain(|(k, _)| *k != ENV_API_KEY);
		pairs.push((ENV_API_KEY, "   "));

		assert!(matches!(
			BoulevardConfig::from_lookup(lookup_from(&pairs)),
			Err(ConfigError::MissingValue { key: ENV_API_KEY })
		));
	}

	#[test]
	fn malformed_secret_is_a_config_error() {
		let mut pairs = required();

		pairs.retain(|(k, _)| *k != ENV_SECRET_KEY);
		pairs.push((ENV_SECRET_KEY, "your-secret-key-here"));

		assert!(matches!(
			BoulevardConfig::from_lookup(lookup_from(&pairs)),
			Err(ConfigError::InvalidSigningKey { .. })
		));
	}

	#[test]
	fn debug_output_redacts_credentials() {
		let config =
			BoulevardConfig::from_lookup(lookup_from(&required())).expect("Config should load.");
		let rendered = format!("{config:?}");

		assert!(!rendered.contains("93ca3f15"));
		assert!(rendered.contains("<redacted>"));
	}
}
