//! Introspection configuration types

use modscope_domain::constants::{STANDARD_MODULE, TEST_SUPPORT_MODULE};
use modscope_domain::value_objects::ProviderRegistrationMetadata;
use serde::{Deserialize, Serialize};

/// Registration metadata for a provider outside the built-in table
///
/// ```toml
/// [[introspection.custom_providers]]
/// name = "$routeProvider"
/// methods = ["when"]
/// overrides = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadataConfig {
    /// Full provider name, e.g. `$routeProvider`
    pub name: String,
    /// Registration method names
    pub methods: Vec<String>,
    /// Whether later registrations of a name replace earlier ones
    #[serde(default = "default_overrides")]
    pub overrides: bool,
}

fn default_overrides() -> bool {
    true
}

impl ProviderMetadataConfig {
    /// Convert into the domain metadata record
    pub fn to_metadata(&self) -> ProviderRegistrationMetadata {
        ProviderRegistrationMetadata::new(&self.name, &self.methods, self.overrides)
    }
}

/// How introspectors build their module graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrospectionConfig {
    /// Load the test-support module after the standard library
    pub include_test_support: bool,
    /// Standard library modules loaded during the built-in phase
    pub standard_modules: Vec<String>,
    /// Test-support module name
    pub test_support_module: String,
    /// Additional providers whose registration methods are intercepted
    pub custom_providers: Vec<ProviderMetadataConfig>,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            include_test_support: false,
            standard_modules: vec![STANDARD_MODULE.to_string()],
            test_support_module: TEST_SUPPORT_MODULE.to_string(),
            custom_providers: Vec::new(),
        }
    }
}
