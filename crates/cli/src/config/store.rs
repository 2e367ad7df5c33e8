//! Local Store Config

use std::path::PathBuf;

use clap::Args;

/// Local state settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Directory holding the cart and session files
    #[arg(long = "store-dir", env = "UPLINE_STORE_DIR", default_value = ".upline")]
    pub dir: PathBuf,
}
