//! Backend-for-frontend for Boulevard bookings: fixed GraphQL documents behind REST-style
//! handlers, plus locally signed scoped client tokens.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod booking;
pub mod config;
pub mod error;
pub mod gateway;
pub mod graphql;
pub mod obs;
#[cfg(feature = "server")] pub mod server;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::{BoulevardConfig, ENV_API_KEY, ENV_API_URL, ENV_BUSINESS_ID, ENV_SECRET_KEY},
		gateway::{ReqwestGateway, ReqwestTransport},
	};

	/// Business identifier baked into test configurations.
	pub const TEST_BUSINESS_ID: &str = "f6a06736-1132-4365-b79a-a69c648a746a";
	/// API key baked into test configurations.
	pub const TEST_API_KEY: &str = "93ca3f15-6f0e-491d-840b-681a0fef80ed";
	/// Base64 of `blvd-test-signing-key-0123456789`.
	pub const TEST_SIGNING_KEY: &str = "Ymx2ZC10ZXN0LXNpZ25pbmcta2V5LTAxMjM0NTY3ODk=";

	/// Builds a configuration whose endpoints hang off `api_root`, e.g. an `httpmock` URL.
	pub fn test_config(api_root: &str) -> BoulevardConfig {
		let api_root = api_root.to_owned();

		BoulevardConfig::from_lookup(move |key| match key {
			ENV_API_KEY => Some(TEST_API_KEY.into()),
			ENV_SECRET_KEY => Some(TEST_SIGNING_KEY.into()),
			ENV_BUSINESS_ID => Some(TEST_BUSINESS_ID.into()),
			ENV_API_URL => Some(api_root.clone()),
			_ => None,
		})
		.expect("Test configuration should load.")
	}

	/// Builds a reqwest client that accepts the self-signed certificates served by `httpmock`.
	pub fn test_reqwest_client() -> ReqwestClient {
		ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.")
	}

	/// Constructs a reqwest-backed [`ReqwestGateway`] that talks to `api_root`.
	pub fn build_test_gateway(api_root: &str) -> ReqwestGateway {
		ReqwestGateway::with_transport(
			test_config(api_root),
			ReqwestTransport::with_client(test_reqwest_client()),
		)
	}

	/// Constructs server state whose gateway talks to `api_root` through
	/// [`test_reqwest_client`].
	#[cfg(feature = "server")]
	pub fn build_test_state(api_root: &str) -> crate::server::AppState {
		let transport: Arc<dyn crate::gateway::GraphqlTransport> =
			Arc::new(ReqwestTransport::with_client(test_reqwest_client()));

		crate::server::AppState::new(crate::gateway::SharedGateway::with_transport(
			test_config(api_root),
			transport,
		))
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(feature = "server")] use color_eyre as _;
#[cfg(test)] use {color_eyre as _, http_body_util as _, httpmock as _, tower as _};
