//! Main application configuration

use serde::{Deserialize, Serialize};

use super::introspection::IntrospectionConfig;
use super::logging::LoggingConfig;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Introspection settings
    pub introspection: IntrospectionConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}
