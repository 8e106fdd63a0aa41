//! Provider registration metadata

use serde::{Deserialize, Serialize};

/// Which methods of a provider count as registrations, and how they combine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRegistrationMetadata {
    /// Provider name, e.g. `$compileProvider`
    pub provider_name: String,
    /// Registration method names
    pub registration_methods: Vec<String>,
    /// Whether a later registration of a name replaces an earlier one
    pub overrides: bool,
}

impl ProviderRegistrationMetadata {
    /// Create a metadata record
    pub fn new<N, M, S>(provider_name: N, registration_methods: M, overrides: bool) -> Self
    where
        N: Into<String>,
        M: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            provider_name: provider_name.into(),
            registration_methods: registration_methods.into_iter().map(Into::into).collect(),
            overrides,
        }
    }

    /// Whether `method` is one of this provider's registration methods
    pub fn accepts(&self, method: &str) -> bool {
        self.registration_methods.iter().any(|m| m == method)
    }
}
