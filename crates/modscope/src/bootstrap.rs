//! Composition root
//!
//! Wires configuration, the in-memory host runtime and the application layer.
//!
//! ```text
//! AppConfig ─→ IntrospectionOptions ─┐
//!                                    ├─→ ModuleIntrospector
//! InMemoryModuleRegistry ─→ Runtime ─┘
//!            │
//!            └─→ DeclarationResolver (static)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let modscope = Modscope::from_loader(&ConfigLoader::new())?;
//! modscope.module("app", &[])?.factory("api", api_factory);
//!
//! let introspector = modscope.introspect(["app"])?;
//! let api = introspector.get_service_declaration("api")?;
//! ```

use std::sync::Arc;

use modscope_application::{
    DeclarationResolver, IntrospectionOptions, ModuleIntrospector, ModuleSpec,
    ProviderMetadataTable,
};
use modscope_domain::entities::ModuleNode;
use modscope_domain::error::Result;
use modscope_domain::ports::ModuleRegistry;
use modscope_infrastructure::config::loader::validate_app_config;
use modscope_infrastructure::config::{AppConfig, ConfigLoader, IntrospectionConfig};
use modscope_infrastructure::{InMemoryHostRuntime, InMemoryModuleRegistry};
use tracing::info;

/// Introspection options described by configuration
pub fn options_from_config(config: &IntrospectionConfig) -> IntrospectionOptions {
    IntrospectionOptions {
        include_test_support: config.include_test_support,
        standard_modules: config.standard_modules.clone(),
        test_support_module: config.test_support_module.clone(),
        custom_providers: config
            .custom_providers
            .iter()
            .map(|provider| provider.to_metadata())
            .collect(),
    }
}

/// Introspect `modules` from `registry` with the in-memory host runtime
///
/// `registry` must already contain the standard library modules, e.g. one
/// created with [`InMemoryModuleRegistry::with_standard_library`].
pub fn module_introspector<I, M>(
    registry: Arc<InMemoryModuleRegistry>,
    modules: I,
    include_test_support: bool,
) -> Result<ModuleIntrospector>
where
    I: IntoIterator<Item = M>,
    M: Into<ModuleSpec>,
{
    let runtime = InMemoryHostRuntime::new(registry.clone());
    ModuleIntrospector::new(
        &runtime,
        registry,
        modules.into_iter().map(Into::into).collect(),
        IntrospectionOptions::default().with_test_support(include_test_support),
    )
}

/// A module registry with the standard library, plus the configuration
/// introspectors are built from
pub struct Modscope {
    config: AppConfig,
    registry: Arc<InMemoryModuleRegistry>,
    runtime: InMemoryHostRuntime,
}

impl Modscope {
    /// Default configuration over a fresh registry
    pub fn new() -> Self {
        Self::assemble(AppConfig::default())
    }

    /// Validate `config` and create a fresh registry
    pub fn with_config(config: AppConfig) -> Result<Self> {
        validate_app_config(&config)?;
        Ok(Self::assemble(config))
    }

    /// Load configuration through `loader`
    pub fn from_loader(loader: &ConfigLoader) -> Result<Self> {
        let config = loader.load()?;
        Ok(Self::assemble(config))
    }

    fn assemble(config: AppConfig) -> Self {
        let registry = Arc::new(InMemoryModuleRegistry::with_standard_library());
        let runtime = InMemoryHostRuntime::new(registry.clone());
        info!(
            modules = registry.len(),
            test_support = config.introspection.include_test_support,
            "modscope initialized"
        );
        Self {
            config,
            registry,
            runtime,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The module namespace
    pub fn registry(&self) -> &Arc<InMemoryModuleRegistry> {
        &self.registry
    }

    /// Define a module
    pub fn module(&self, name: &str, requires: &[&str]) -> Result<Arc<ModuleNode>> {
        self.registry.create_module(name, requires)
    }

    /// Introspection options from the configuration
    pub fn options(&self) -> IntrospectionOptions {
        options_from_config(&self.config.introspection)
    }

    /// Build the graph for `modules` and capture its registrations
    pub fn introspect<I, M>(&self, modules: I) -> Result<ModuleIntrospector>
    where
        I: IntoIterator<Item = M>,
        M: Into<ModuleSpec>,
    {
        self.introspect_with(modules, self.options())
    }

    /// Like [`Self::introspect`] with explicit options
    pub fn introspect_with<I, M>(
        &self,
        modules: I,
        options: IntrospectionOptions,
    ) -> Result<ModuleIntrospector>
    where
        I: IntoIterator<Item = M>,
        M: Into<ModuleSpec>,
    {
        ModuleIntrospector::new(
            &self.runtime,
            self.registry.clone(),
            modules.into_iter().map(Into::into).collect(),
            options,
        )
    }

    /// Static resolver over the registry, with configured custom providers
    pub fn resolver(&self) -> Result<DeclarationResolver> {
        let metadata = ProviderMetadataTable::built_in()
            .with_custom(self.options().custom_providers)?;
        Ok(DeclarationResolver::new(self.registry.clone(), metadata))
    }
}

impl Default for Modscope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Modscope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modscope")
            .field("config", &self.config)
            .field("modules", &self.registry.module_names())
            .finish()
    }
}
