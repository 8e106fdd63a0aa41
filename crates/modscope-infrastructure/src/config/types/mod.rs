//! Configuration types module

pub mod app;
pub mod introspection;
pub mod logging;

pub use app::AppConfig;
pub use introspection::{IntrospectionConfig, ProviderMetadataConfig};
pub use logging::LoggingConfig;
