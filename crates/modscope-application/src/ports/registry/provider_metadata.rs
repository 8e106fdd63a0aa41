//! Provider Registration Metadata Registry
//!
//! Built-in registration providers register themselves into the
//! [`PROVIDER_METADATA`] distributed slice at compile time. A
//! [`ProviderMetadataTable`] snapshots the slice and may be extended with
//! custom providers from configuration.

use indexmap::IndexMap;
use modscope_domain::constants::{
    ANIMATE_PROVIDER, COMPILE_PROVIDER, CONTROLLER_PROVIDER, FILTER_PROVIDER, METHOD_COMPONENT,
    METHOD_DIRECTIVE, METHOD_REGISTER, PROVIDE, PROVIDE_METHODS,
};
use modscope_domain::error::{Error, Result};
use modscope_domain::value_objects::ProviderRegistrationMetadata;

/// Registry entry describing a registration provider
pub struct ProviderMetadataEntry {
    /// Full provider name (e.g. "$compileProvider")
    pub provider_name: &'static str,
    /// Registration method names
    pub registration_methods: &'static [&'static str],
    /// Whether later registrations of a name replace earlier ones
    pub overrides: bool,
}

impl ProviderMetadataEntry {
    /// Convert into the domain metadata record
    pub fn to_metadata(&self) -> ProviderRegistrationMetadata {
        ProviderRegistrationMetadata::new(
            self.provider_name,
            self.registration_methods.iter().copied(),
            self.overrides,
        )
    }
}

// Auto-collection via linkme distributed slices
#[linkme::distributed_slice]
pub static PROVIDER_METADATA: [ProviderMetadataEntry] = [..];

#[linkme::distributed_slice(PROVIDER_METADATA)]
static PROVIDE_METADATA: ProviderMetadataEntry = ProviderMetadataEntry {
    provider_name: PROVIDE,
    registration_methods: &PROVIDE_METHODS,
    overrides: true,
};

#[linkme::distributed_slice(PROVIDER_METADATA)]
static FILTER_PROVIDER_METADATA: ProviderMetadataEntry = ProviderMetadataEntry {
    provider_name: FILTER_PROVIDER,
    registration_methods: &[METHOD_REGISTER],
    overrides: true,
};

#[linkme::distributed_slice(PROVIDER_METADATA)]
static CONTROLLER_PROVIDER_METADATA: ProviderMetadataEntry = ProviderMetadataEntry {
    provider_name: CONTROLLER_PROVIDER,
    registration_methods: &[METHOD_REGISTER],
    overrides: true,
};

// Several directives may share one name, so nothing is overridden
#[linkme::distributed_slice(PROVIDER_METADATA)]
static COMPILE_PROVIDER_METADATA: ProviderMetadataEntry = ProviderMetadataEntry {
    provider_name: COMPILE_PROVIDER,
    registration_methods: &[METHOD_DIRECTIVE, METHOD_COMPONENT],
    overrides: false,
};

#[linkme::distributed_slice(PROVIDER_METADATA)]
static ANIMATE_PROVIDER_METADATA: ProviderMetadataEntry = ProviderMetadataEntry {
    provider_name: ANIMATE_PROVIDER,
    registration_methods: &[METHOD_REGISTER],
    overrides: true,
};

/// Look up a registered entry by provider name
pub fn resolve_provider_metadata(provider_name: &str) -> Option<ProviderRegistrationMetadata> {
    PROVIDER_METADATA
        .iter()
        .find(|entry| entry.provider_name == provider_name)
        .map(ProviderMetadataEntry::to_metadata)
}

/// List all registered entries as `(name, methods)`
pub fn list_provider_metadata() -> Vec<(&'static str, &'static [&'static str])> {
    PROVIDER_METADATA
        .iter()
        .map(|entry| (entry.provider_name, entry.registration_methods))
        .collect()
}

/// Read-only metadata lookup used by the resolver and the registration log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderMetadataTable {
    entries: IndexMap<String, ProviderRegistrationMetadata>,
}

impl ProviderMetadataTable {
    /// Table of the registered built-in providers, ordered by name
    pub fn built_in() -> Self {
        let mut entries: IndexMap<String, ProviderRegistrationMetadata> = PROVIDER_METADATA
            .iter()
            .map(|entry| (entry.provider_name.to_string(), entry.to_metadata()))
            .collect();
        entries.sort_keys();
        Self { entries }
    }

    /// Add custom providers; a custom entry may not replace a built-in one
    pub fn with_custom<I>(mut self, custom: I) -> Result<Self>
    where
        I: IntoIterator<Item = ProviderRegistrationMetadata>,
    {
        for metadata in custom {
            if self.entries.contains_key(&metadata.provider_name) {
                return Err(Error::configuration(format!(
                    "Custom provider '{}' shadows an existing registration provider",
                    metadata.provider_name
                )));
            }
            self.entries.insert(metadata.provider_name.clone(), metadata);
        }
        Ok(self)
    }

    /// Metadata of `provider_name`
    pub fn get(&self, provider_name: &str) -> Option<&ProviderRegistrationMetadata> {
        self.entries.get(provider_name)
    }

    /// Whether later registrations replace earlier ones; unknown providers override
    pub fn overrides(&self, provider_name: &str) -> bool {
        self.get(provider_name)
            .is_none_or(|metadata| metadata.overrides)
    }

    /// Whether `method` is a registration method of `provider_name`
    pub fn accepts(&self, provider_name: &str, method: &str) -> bool {
        self.get(provider_name)
            .is_some_and(|metadata| metadata.accepts(method))
    }

    /// Known provider names
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All metadata records
    pub fn iter(&self) -> impl Iterator<Item = &ProviderRegistrationMetadata> {
        self.entries.values()
    }
}
