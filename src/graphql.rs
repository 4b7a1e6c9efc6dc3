//! GraphQL wire envelope plus the fixed documents this service sends upstream.

pub mod document;

pub use document::*;

// crates.io
use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::{_prelude::*, error::UpstreamError};

/// Request body POSTed to a GraphQL endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct GraphqlRequest<'a> {
	/// Document text.
	pub query: &'a str,
	/// Variables bound to the document; `{}` when the document takes none.
	pub variables: Value,
}
impl<'a> GraphqlRequest<'a> {
	/// Pairs a document with its variables.
	pub fn new(document: &'a Document, variables: Value) -> Self {
		let variables = if variables.is_null() { Value::Object(Default::default()) } else { variables };

		Self { query: document.text, variables }
	}
}

/// Single entry of a GraphQL `errors` array.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GraphqlError {
	/// Error message reported by the server.
	pub message: String,
}

/// Response envelope returned by a GraphQL endpoint.
#[derive(Clone, Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct GraphqlResponse<T> {
	/// Result payload; may be absent when the request failed.
	#[serde(default = "Option::default")]
	pub data: Option<T>,
	/// Errors reported alongside (or instead of) data.
	#[serde(default)]
	pub errors: Vec<GraphqlError>,
}
impl<T> GraphqlResponse<T> {
	/// Parses a response body, keeping the JSON path of any shape mismatch.
	pub fn from_slice(body: &[u8]) -> Result<Self, UpstreamError>
	where
		T: DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut de).map_err(|source| UpstreamError::Parse { source })
	}

	/// Returns the payload, surfacing the first reported error when present.
	pub fn into_data(self, operation: &'static str) -> Result<T, UpstreamError> {
		if let Some(first) = self.errors.into_iter().next() {
			return Err(UpstreamError::Graphql { message: first.message });
		}

		self.data.ok_or(UpstreamError::MissingData { operation })
	}
}

/// Relay-style connection.
#[derive(Clone, Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
	/// Page of edges.
	#[serde(default = "Vec::new")]
	pub edges: Vec<Edge<T>>,
}
impl<T> Connection<T> {
	/// Drops the edge wrappers.
	pub fn into_nodes(self) -> Vec<T> {
		self.edges.into_iter().map(|edge| edge.node).collect()
	}

	/// Returns the first node, if any.
	pub fn first_node(self) -> Option<T> {
		self.edges.into_iter().next().map(|edge| edge.node)
	}
}

/// Relay-style edge.
#[derive(Clone, Debug, Deserialize)]
pub struct Edge<T> {
	/// Wrapped node.
	pub node: T,
}
