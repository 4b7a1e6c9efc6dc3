//! `blvd-bff` binary: loads configuration from the environment and serves the booking API.

// crates.io
use color_eyre::Result;
// self
use blvd_bff::{
	config::BoulevardConfig,
	server::{self, AppState, ServerSettings},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	server::init_tracing()?;

	let config = BoulevardConfig::from_env()?;
	let settings = ServerSettings::from_env()?;
	let state = AppState::from_config(config)?;

	server::serve(state, settings).await?;

	Ok(())
}
