//! Geography Config

use clap::Args;

/// Geography service settings.
#[derive(Debug, Args)]
pub struct GeoConfig {
    /// countriesnow-compatible service base URL
    #[arg(
        id = "geo_url",
        long = "geo-url",
        env = "UPLINE_GEO_URL",
        default_value = "https://countriesnow.space/api/v0.1"
    )]
    pub url: String,
}
