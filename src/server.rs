//! HTTP surface consumed by the booking frontend.
//!
//! Enabled by the `server` feature. Each route validates its JSON body, calls one gateway
//! operation, and wraps the result in the response shape the frontend expects.

pub mod routes;

pub use routes::*;

// std
use std::net::{IpAddr, SocketAddr};
// crates.io
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::TryInitError};
// self
use crate::{
	_prelude::*,
	config::BoulevardConfig,
	error::ConfigError,
	gateway::{GraphqlTransport, ReqwestTransport, SharedGateway},
};

/// Environment variable holding the listener port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable holding the listener address.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
/// Port used when [`ENV_PORT`] is unset.
pub const DEFAULT_PORT: u16 = 3001;
/// Address used when [`ENV_BIND_ADDR`] is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

/// Listener settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServerSettings {
	/// Socket the HTTP server binds.
	pub addr: SocketAddr,
}
impl ServerSettings {
	/// Loads the settings from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Loads the settings from an arbitrary key lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |key: &'static str| {
			lookup(key).map(|value| value.trim().to_owned()).filter(|value| !value.is_empty())
		};
		let port = match read(ENV_PORT) {
			Some(value) => value
				.parse::<u16>()
				.map_err(|_| ConfigError::InvalidBindAddress { key: ENV_PORT, value })?,
			None => DEFAULT_PORT,
		};
		let ip = match read(ENV_BIND_ADDR) {
			Some(value) => value
				.parse::<IpAddr>()
				.map_err(|_| ConfigError::InvalidBindAddress { key: ENV_BIND_ADDR, value })?,
			None => IpAddr::from([0, 0, 0, 0]),
		};

		Ok(Self { addr: SocketAddr::new(ip, port) })
	}
}
impl Default for ServerSettings {
	fn default() -> Self {
		Self { addr: SocketAddr::new(IpAddr::from([0, 0, 0, 0]), DEFAULT_PORT) }
	}
}

/// State shared by every handler.
#[derive(Clone, Debug)]
pub struct AppState {
	/// Gateway to the Boulevard GraphQL API.
	pub gateway: SharedGateway,
}
impl AppState {
	/// Wraps an existing gateway.
	pub fn new(gateway: SharedGateway) -> Self {
		Self { gateway }
	}

	/// Builds state around a fresh reqwest transport.
	pub fn from_config(config: BoulevardConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.build()?;
		let transport: Arc<dyn GraphqlTransport> = Arc::new(ReqwestTransport::with_client(client));

		Ok(Self::new(SharedGateway::with_transport(config, transport)))
	}
}

/// Installs the global `tracing` subscriber; `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() -> Result<(), TryInitError> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false)).try_init()
}

/// Serves the API on `settings.addr` until Ctrl-C.
pub async fn serve(state: AppState, settings: ServerSettings) -> std::io::Result<()> {
	let business = state.gateway.config.business_id.clone();
	let listener = TcpListener::bind(settings.addr).await?;

	tracing::info!(addr = %settings.addr, business = %business, "Booking backend listening.");

	axum::serve(listener, create_router(state)).with_graceful_shutdown(shutdown_signal()).await
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "Ctrl-C handler could not be installed.");

		std::future::pending::<()>().await;
	}

	tracing::info!("Shutdown signal received.");
}
