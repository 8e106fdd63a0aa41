//! Configuration
//!
//! Layered configuration: defaults, an optional `modscope.toml`, then
//! `MODSCOPE_` environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, IntrospectionConfig, LoggingConfig, ProviderMetadataConfig};
