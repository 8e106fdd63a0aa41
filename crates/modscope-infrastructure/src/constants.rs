//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Provider and method names are defined in `modscope_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "modscope.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "modscope";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "MODSCOPE";

/// Separator for nested keys in environment variables (`MODSCOPE_LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding an `EnvFilter` directive
pub const LOG_FILTER_ENV: &str = "MODSCOPE_LOG";

/// Fallback log file stem when the configured path has none
pub const LOG_FILE_STEM: &str = "modscope";

