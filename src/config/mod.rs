//! TOML configuration for the directory endpoint, the table and exports.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, ExportConfig, ViewConfig};
