//! Cart identifier storage configuration.

use std::path::PathBuf;

use clap::Args;

/// Where the active cart identifier is persisted between runs.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// Path of the file holding the active cart identifier.
    #[arg(long, env = "CART_STORAGE_PATH", default_value = ".veranda/cart_id")]
    pub cart_id_path: PathBuf,
}
