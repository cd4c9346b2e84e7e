//! Application configuration.

use clap::Args;

pub mod commerce;
pub mod content;
pub mod storage;

pub use commerce::CommerceConfig;
pub use content::ContentConfig;
pub use storage::StorageConfig;

/// Storefront configuration, gathered from CLI arguments and the
/// environment.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Commerce backend settings.
    #[command(flatten)]
    pub commerce: CommerceConfig,

    /// Content backend settings.
    #[command(flatten)]
    pub content: ContentConfig,

    /// Cart identifier storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,
}
