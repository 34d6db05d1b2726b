//! Configuration file loading for slotguard
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SLOTGUARD_*` environment variables (`__` separates section and key)
//! 2. `--config <path>` specified file
//! 3. Project root: `./slotguard.toml` or `./.slotguard.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/slotguard/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDepletionConfig, FileIdentityConfig,
    FileReauthorizationConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
