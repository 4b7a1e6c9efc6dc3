//! Transport seam between the gateway and an HTTP stack.
//!
//! [`GraphqlTransport`] is the gateway's only dependency on an HTTP client. The gateway
//! serializes the GraphQL body and computes the `Authorization` header; implementations only
//! POST bytes and hand back the status and body, mapping their own failures into
//! [`TransportError`].

// self
use crate::{_prelude::*, auth::Secret, error::TransportError};

/// Future returned by [`GraphqlTransport::post`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to POST a GraphQL document.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by every
/// request handler behind an `Arc`.
pub trait GraphqlTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves once the full response body is available.
	///
	/// Non-success statuses are not errors at this layer; the gateway classifies them.
	fn post(&self, request: TransportRequest) -> TransportFuture<'_>;
}

/// Outbound GraphQL POST.
#[derive(Clone)]
pub struct TransportRequest {
	/// Target endpoint.
	pub endpoint: Url,
	/// Full `Authorization` header value.
	pub authorization: Secret,
	/// JSON-encoded GraphQL request body.
	pub body: Vec<u8>,
}
impl Debug for TransportRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TransportRequest")
			.field("endpoint", &self.endpoint.as_str())
			.field("authorization", &self.authorization)
			.field("body_len", &self.body.len())
			.finish()
	}
}

/// Raw upstream response.
#[derive(Clone, Debug, Default)]
pub struct TransportResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl TransportResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl GraphqlTransport for ReqwestTransport {
	fn post(&self, request: TransportRequest) -> TransportFuture<'_> {
		use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};

		Box::pin(async move {
			let TransportRequest { endpoint, authorization, body } = request;
			let response = self
				.0
				.post(endpoint)
				.header(AUTHORIZATION, authorization.expose())
				.header(CONTENT_TYPE, "application/json")
				.header(ACCEPT, "application/json")
				.body(body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(TransportResponse { status, body })
		})
	}
}
