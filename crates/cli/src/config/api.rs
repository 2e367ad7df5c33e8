//! API Config

use clap::Args;

/// Remote API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// API base URL
    #[arg(id = "api_url", long = "api-url", env = "UPLINE_API_URL")]
    pub url: String,

    /// Pre-issued bearer token; overrides any stored session token
    #[arg(long = "api-token", env = "UPLINE_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// ISO code of the currency the API's amounts are in
    #[arg(long, env = "UPLINE_CURRENCY", default_value = "NGN")]
    pub currency: String,
}
