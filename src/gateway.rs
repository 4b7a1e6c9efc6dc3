//! Boulevard GraphQL gateway: credential composition, dispatch, and response classification.

pub mod transport;

pub use transport::*;

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{ApiKey, ClientToken, ClientTokenIssuer, Secret},
	config::BoulevardConfig,
	error::UpstreamError,
	graphql::{Document, GraphqlRequest, GraphqlResponse, Surface},
};

#[cfg(feature = "reqwest")]
/// Gateway specialized for the crate's default reqwest transport.
pub type ReqwestGateway = Gateway<ReqwestTransport>;
/// Gateway over a type-erased transport, as held by request handlers.
pub type SharedGateway = Gateway<dyn GraphqlTransport>;

/// Sends fixed GraphQL documents to Boulevard on behalf of request handlers.
///
/// The gateway owns the transport and a shared handle to the immutable configuration, so every
/// operation reads the same API key, business identifier, and signing key without global state.
pub struct Gateway<T>
where
	T: ?Sized + GraphqlTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	/// Process-wide configuration.
	pub config: Arc<BoulevardConfig>,
}
impl<T> Gateway<T>
where
	T: ?Sized + GraphqlTransport,
{
	/// Creates a gateway over the caller-provided transport.
	pub fn with_transport(
		config: impl Into<Arc<BoulevardConfig>>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self { transport: transport.into(), config: config.into() }
	}

	/// Returns the scoped token issuer bound to this gateway's configuration.
	pub fn token_issuer(&self) -> ClientTokenIssuer<'_> {
		self.config.token_issuer()
	}

	/// Sends an admin-surface document authenticated with the API key alone.
	pub async fn admin<D>(&self, document: &Document, variables: Value) -> Result<D>
	where
		D: DeserializeOwned,
	{
		debug_assert_eq!(document.surface, Surface::Admin, "{} is not an admin document", document.name);

		self.execute(document, variables, None).await
	}

	/// Sends a client-surface document, authenticated with the API key and `token` when given.
	pub async fn client<D>(
		&self,
		document: &Document,
		variables: Value,
		token: Option<&ClientToken>,
	) -> Result<D>
	where
		D: DeserializeOwned,
	{
		debug_assert_eq!(document.surface, Surface::Client, "{} is not a client document", document.name);

		self.execute(document, variables, token).await
	}

	async fn execute<D>(
		&self,
		document: &Document,
		variables: Value,
		token: Option<&ClientToken>,
	) -> Result<D>
	where
		D: DeserializeOwned,
	{
		let endpoint = match document.surface {
			Surface::Admin => self.config.endpoints.admin.clone(),
			Surface::Client => self.config.endpoints.client.clone(),
		};
		let body = serde_json::to_vec(&GraphqlRequest::new(document, variables))
			.map_err(|e| Error::invalid_request(format!("Variables cannot be encoded: {e}.")))?;
		let authorization = basic_authorization(&self.config.api_key, token);

		#[cfg(feature = "tracing")]
		tracing::debug!(
			operation = document.name,
			surface = document.surface.as_str(),
			scoped = token.is_some(),
			"Calling Boulevard GraphQL API."
		);

		let response =
			self.transport.post(TransportRequest { endpoint, authorization, body }).await?;

		if !response.is_success() {
			return Err(UpstreamError::status(response.status, &response.body).into());
		}

		let data = GraphqlResponse::<D>::from_slice(&response.body)?.into_data(document.name)?;

		Ok(data)
	}
}
impl<T> Clone for Gateway<T>
where
	T: ?Sized + GraphqlTransport,
{
	fn clone(&self) -> Self {
		Self { transport: Arc::clone(&self.transport), config: Arc::clone(&self.config) }
	}
}
impl<T> Debug for Gateway<T>
where
	T: ?Sized + GraphqlTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("business_id", &self.config.business_id)
			.field("admin", &self.config.endpoints.admin.as_str())
			.field("client", &self.config.endpoints.client.as_str())
			.finish()
	}
}

/// Builds `Basic base64(api_key ":" token)`; the password half is empty without a token.
pub fn basic_authorization(api_key: &ApiKey, token: Option<&ClientToken>) -> Secret {
	let password = token.map(ClientToken::expose).unwrap_or_default();
	let credentials = STANDARD.encode(format!("{}:{password}", api_key.expose()));

	Secret::new(format!("Basic {credentials}"))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn basic_authorization_without_token_has_empty_password() {
		let header = basic_authorization(&ApiKey::new("api-key"), None);

		assert_eq!(header.expose(), format!("Basic {}", STANDARD.encode("api-key:")));
	}

	#[test]
	fn basic_authorization_embeds_scoped_token() {
		let token = ClientToken::new("c2lnbmF0dXJlblvd-client-v1biz42client1700000000");
		let header = basic_authorization(&ApiKey::new("api-key"), Some(&token));
		let encoded = header.expose().strip_prefix("Basic ").expect("Scheme must be Basic.");
		let decoded = STANDARD.decode(encoded).expect("Credentials must be base64.");

		assert_eq!(decoded, format!("api-key:{}", token.expose()).into_bytes());
	}
}
