//! CLI configuration module

use clap::Parser;

use upline_app::context::AppSettings;

use crate::{
    commands::Command,
    config::{api::ApiConfig, geo::GeoConfig, logging::LoggingConfig, store::StoreConfig},
};

pub(crate) mod api;
pub(crate) mod geo;
pub(crate) mod logging;
pub(crate) mod store;

pub use logging::LogFormat;

/// Upline dashboard CLI configuration
#[derive(Debug, Parser)]
#[command(name = "upline", about = "Upline dashboard CLI", long_about = None)]
pub struct CliConfig {
    /// Remote API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Geography service settings.
    #[command(flatten)]
    pub geo: GeoConfig,

    /// Local state settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Settings for building the application context.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            api_url: self.api.url.clone(),
            currency: self.api.currency.clone(),
            geo_url: self.geo.url.clone(),
        }
    }
}
