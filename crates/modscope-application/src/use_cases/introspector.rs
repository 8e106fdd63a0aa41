//! Module Introspector Use Case
//!
//! Builds an isolated injector graph for a set of modules with interception
//! installed ahead of every module, then answers declaration queries from the
//! registration log it captured.

use std::sync::Arc;

use indexmap::IndexMap;
use modscope_domain::constants::{
    ANIMATE_PROVIDER, COMPILE_PROVIDER, CONTROLLER_MEMBER, CONTROLLER_PROVIDER, FILTER_PROVIDER,
    METHOD_COMPONENT, METHOD_DIRECTIVE, METHOD_VALUE, PROVIDE, STANDARD_MODULE,
    TEST_SUPPORT_MODULE,
};
use modscope_domain::error::{Error, Result};
use modscope_domain::ports::{ConfigStep, GraphStep, HostRuntime, Injector, ModuleRegistry};
use modscope_domain::value_objects::{
    ComponentDeclaration, Declaration, DeclarationOrigin, Instance, Locals, ProviderDeclaration,
    ProviderRegistrationMetadata, RegistrationCall,
};
use tracing::{info, warn};

use super::interception::InterceptingCapability;
use super::registration_log::RegistrationLog;
use crate::domain_services::DeclarationResolver;
use crate::ports::registry::ProviderMetadataTable;

/// A module to introspect
#[derive(Clone)]
pub enum ModuleSpec {
    /// A module registered in the module registry
    Named(String),
    /// An anonymous configuration step
    Inline(Arc<dyn ConfigStep>),
    /// An ad hoc module registering each entry with `$provide.value`
    Values(IndexMap<String, Declaration>),
}

impl ModuleSpec {
    /// Anonymous module from a closure or [`ConfigStep`]
    pub fn inline(step: impl ConfigStep + 'static) -> Self {
        Self::Inline(Arc::new(step))
    }

    /// Ad hoc value module from `(name, declaration)` pairs
    pub fn values<I, K, D>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: Into<Declaration>,
    {
        Self::Values(
            values
                .into_iter()
                .map(|(name, declaration)| (name.into(), declaration.into()))
                .collect(),
        )
    }

    fn into_step(self) -> GraphStep {
        match self {
            Self::Named(name) => GraphStep::Module(name),
            Self::Inline(step) => GraphStep::Config(step),
            Self::Values(values) => GraphStep::config(move |injector: &dyn Injector| {
                injector.provider(PROVIDE)?.call(
                    injector,
                    METHOD_VALUE,
                    RegistrationCall::Map(values.clone()),
                )
            }),
        }
    }
}

impl From<&str> for ModuleSpec {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for ModuleSpec {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl std::fmt::Debug for ModuleSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Inline(_) => f.write_str("Inline(..)"),
            Self::Values(values) => f
                .debug_tuple("Values")
                .field(&values.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// How the introspected graph is assembled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectionOptions {
    /// Load the test-support module after the standard library
    pub include_test_support: bool,
    /// Standard library modules, loaded first and tagged built-in
    pub standard_modules: Vec<String>,
    /// Name of the test-support module
    pub test_support_module: String,
    /// Registration providers intercepted in addition to the built-in ones
    pub custom_providers: Vec<ProviderRegistrationMetadata>,
}

impl Default for IntrospectionOptions {
    fn default() -> Self {
        Self {
            include_test_support: false,
            standard_modules: vec![STANDARD_MODULE.to_string()],
            test_support_module: TEST_SUPPORT_MODULE.to_string(),
            custom_providers: Vec::new(),
        }
    }
}

impl IntrospectionOptions {
    /// Toggle loading the test-support module
    pub fn with_test_support(mut self, include: bool) -> Self {
        self.include_test_support = include;
        self
    }

    /// Intercept an additional registration provider
    pub fn with_custom_provider(mut self, metadata: ProviderRegistrationMetadata) -> Self {
        self.custom_providers.push(metadata);
        self
    }

    /// Modules tagged built-in, in load order
    fn built_in_modules(&self) -> Vec<String> {
        let mut modules = self.standard_modules.clone();
        if self.include_test_support {
            modules.push(self.test_support_module.clone());
        }
        modules
    }
}

/// Declaration queries over one introspected module graph
pub struct ModuleIntrospector {
    injector: Arc<dyn Injector>,
    log: Arc<RegistrationLog>,
    resolver: DeclarationResolver,
    built_in_roots: Vec<String>,
    static_roots: Vec<String>,
}

impl ModuleIntrospector {
    /// Build the graph for `modules` and capture its registrations
    pub fn new(
        runtime: &dyn HostRuntime,
        registry: Arc<dyn ModuleRegistry>,
        modules: Vec<ModuleSpec>,
        options: IntrospectionOptions,
    ) -> Result<Self> {
        let metadata =
            ProviderMetadataTable::built_in().with_custom(options.custom_providers.clone())?;
        let log = Arc::new(RegistrationLog::new(metadata.clone()));

        let built_in_modules = options.built_in_modules();
        let built_in_roots = built_in_modules.clone();
        let static_roots = modules
            .iter()
            .filter_map(|module| match module {
                ModuleSpec::Named(name) => Some(name.clone()),
                ModuleSpec::Inline(_) | ModuleSpec::Values(_) => None,
            })
            .collect();

        let mut steps = Vec::with_capacity(built_in_modules.len() + modules.len() + 2);
        let bootstrap_log = Arc::clone(&log);
        steps.push(GraphStep::config(move |injector: &dyn Injector| {
            bootstrap_log.set_built_in_phase(true);
            InterceptingCapability::install(injector, PROVIDE, &bootstrap_log)
        }));
        steps.extend(built_in_modules.into_iter().map(GraphStep::Module));
        let phase_log = Arc::clone(&log);
        steps.push(GraphStep::config(move |_: &dyn Injector| -> Result<()> {
            phase_log.set_built_in_phase(false);
            Ok(())
        }));
        let module_count = modules.len();
        steps.extend(modules.into_iter().map(ModuleSpec::into_step));

        let injector = runtime.build_graph(steps)?;
        info!(
            modules = module_count,
            test_support = options.include_test_support,
            "Module graph introspected"
        );

        Ok(Self {
            injector,
            log,
            resolver: DeclarationResolver::new(registry, metadata),
            built_in_roots,
            static_roots,
        })
    }

    /// Injector of the introspected graph
    pub fn injector(&self) -> &Arc<dyn Injector> {
        &self.injector
    }

    /// Names registered on `provider_name`, in first-registration order
    pub fn component_names(&self, provider_name: &str) -> Result<Vec<String>> {
        self.log.component_names(provider_name)
    }

    /// Every kept declaration of `component_name` on `provider_name`
    pub fn get_provider_component_declarations(
        &self,
        provider_name: &str,
        component_name: &str,
    ) -> Result<Vec<ComponentDeclaration>> {
        self.log
            .components(provider_name, component_name)?
            .ok_or_else(|| Error::component_not_found(component_name, provider_name))
    }

    /// The effective declaration of `component_name` on `provider_name`
    pub fn get_provider_component_declaration(
        &self,
        provider_name: &str,
        component_name: &str,
    ) -> Result<ComponentDeclaration> {
        self.get_provider_component_declarations(provider_name, component_name)?
            .pop()
            .ok_or_else(|| Error::component_not_found(component_name, provider_name))
    }

    /// Service declaration (`$provide`)
    pub fn get_service_declaration(&self, name: &str) -> Result<ComponentDeclaration> {
        self.get_provider_component_declaration(PROVIDE, name)
    }

    /// Filter declaration (`$filterProvider`)
    pub fn get_filter_declaration(&self, name: &str) -> Result<ComponentDeclaration> {
        self.get_provider_component_declaration(FILTER_PROVIDER, name)
    }

    /// Controller declaration (`$controllerProvider`)
    pub fn get_controller_declaration(&self, name: &str) -> Result<ComponentDeclaration> {
        self.get_provider_component_declaration(CONTROLLER_PROVIDER, name)
    }

    /// Animation declaration (`$animateProvider`)
    pub fn get_animation_declaration(&self, name: &str) -> Result<ComponentDeclaration> {
        self.get_provider_component_declaration(ANIMATE_PROVIDER, name)
    }

    /// Directive and component declarations sharing `name`, built-ins first
    pub fn get_directive_declaration(&self, name: &str) -> Result<Vec<ComponentDeclaration>> {
        self.get_provider_component_declarations(COMPILE_PROVIDER, name)
    }

    /// Declaration of provider `provider_name` itself, e.g. `$httpProvider`
    pub fn get_provider_declaration(&self, provider_name: &str) -> Result<ProviderDeclaration> {
        self.log
            .provider_declaration(provider_name)?
            .ok_or_else(|| Error::provider_not_found(provider_name))
    }

    /// Providers registered by the standard library
    pub fn get_built_in_provider_names(&self) -> Result<Vec<String>> {
        self.log.built_in_provider_names()
    }

    /// Registration metadata of `provider_name`
    pub fn get_provider_metadata(&self, provider_name: &str) -> Option<ProviderRegistrationMetadata> {
        self.log.metadata().get(provider_name).cloned()
    }

    /// Controllers of the components registered as `name`
    ///
    /// Every declaration under `name` must come from `component`.
    pub fn get_ng15_component_controllers(&self, name: &str) -> Result<Vec<ComponentDeclaration>> {
        let mut controllers = Vec::new();
        for declaration in self.get_directive_declaration(name)? {
            if declaration.provider_method != METHOD_COMPONENT {
                return Err(Error::shape_mismatch(
                    name,
                    METHOD_COMPONENT,
                    declaration.provider_method.as_str(),
                ));
            }
            if let Some(controller) = declaration.raw_declaration.member(CONTROLLER_MEMBER) {
                controllers.push(self.controller_declaration(&declaration, controller)?);
            }
        }
        Ok(controllers)
    }

    /// Controllers of the directives registered as `name`
    ///
    /// Directive factories are invoked to obtain their definition objects.
    /// Every declaration under `name` must come from `directive`.
    pub fn get_directive_controllers(&self, name: &str) -> Result<Vec<ComponentDeclaration>> {
        let mut controllers = Vec::new();
        for declaration in self.get_directive_declaration(name)? {
            if declaration.provider_method != METHOD_DIRECTIVE {
                return Err(Error::shape_mismatch(
                    name,
                    METHOD_DIRECTIVE,
                    declaration.provider_method.as_str(),
                ));
            }
            let definition = self
                .injector
                .invoke(&declaration.raw_declaration, &Locals::new())?;
            // A bare link function has no controller
            let Instance::Declaration(definition) = definition else {
                continue;
            };
            if let Some(controller) = definition.member(CONTROLLER_MEMBER) {
                controllers.push(self.controller_declaration(&declaration, controller)?);
            }
        }
        Ok(controllers)
    }

    /// Resolve an embedded controller; a string names a registered controller
    fn controller_declaration(
        &self,
        owner: &ComponentDeclaration,
        controller: &Declaration,
    ) -> Result<ComponentDeclaration> {
        if let Some(reference) = controller.as_value().and_then(|value| value.as_str()) {
            // "Ctrl as vm"
            let controller_name = reference
                .split_once(" as ")
                .map_or(reference, |(name, _)| name)
                .trim();
            return self.get_controller_declaration(controller_name);
        }
        Ok(ComponentDeclaration::new(
            owner.provider_method.as_str(),
            owner.component_name.as_str(),
            controller.clone(),
            owner.built_in,
        ))
    }

    /// Where the effective declaration of service `name` came from
    pub fn service_declaration_origin(&self, name: &str) -> DeclarationOrigin {
        match self.log.components(PROVIDE, name) {
            Ok(Some(declarations)) => match declarations.last() {
                Some(declaration) if declaration.built_in => DeclarationOrigin::BuiltIn,
                Some(_) => DeclarationOrigin::UserDefined,
                None => DeclarationOrigin::Undeclared,
            },
            Ok(None) => DeclarationOrigin::Undeclared,
            Err(e) => {
                warn!(service = name, error = %e, "Registration log unreadable");
                DeclarationOrigin::Undeclared
            }
        }
    }

    /// Whether a module under introspection declares service `name`
    pub fn has_service_declaration(&self, name: &str) -> bool {
        self.service_declaration_origin(name) == DeclarationOrigin::UserDefined
    }

    /// Service declarations injected into service `name`
    pub fn get_service_dependencies(
        &self,
        name: &str,
        ignore: &[&str],
    ) -> Result<IndexMap<String, ComponentDeclaration>> {
        let declaration = self.get_service_declaration(name)?;
        self.expand_dependencies([&declaration], ignore)
    }

    /// Service declarations injected into filter `name`
    pub fn get_filter_dependencies(
        &self,
        name: &str,
        ignore: &[&str],
    ) -> Result<IndexMap<String, ComponentDeclaration>> {
        let declaration = self.get_filter_declaration(name)?;
        self.expand_dependencies([&declaration], ignore)
    }

    /// Service declarations injected into controller `name`
    pub fn get_controller_dependencies(
        &self,
        name: &str,
        ignore: &[&str],
    ) -> Result<IndexMap<String, ComponentDeclaration>> {
        let declaration = self.get_controller_declaration(name)?;
        self.expand_dependencies([&declaration], ignore)
    }

    /// Service declarations injected into any directive registered as `name`
    pub fn get_directive_dependencies(
        &self,
        name: &str,
        ignore: &[&str],
    ) -> Result<IndexMap<String, ComponentDeclaration>> {
        let declarations = self.get_directive_declaration(name)?;
        self.expand_dependencies(&declarations, ignore)
    }

    /// Service declarations injected into animation `name`
    pub fn get_animation_dependencies(
        &self,
        name: &str,
        ignore: &[&str],
    ) -> Result<IndexMap<String, ComponentDeclaration>> {
        let declaration = self.get_animation_declaration(name)?;
        self.expand_dependencies([&declaration], ignore)
    }

    fn expand_dependencies<'a, I>(
        &self,
        declarations: I,
        ignore: &[&str],
    ) -> Result<IndexMap<String, ComponentDeclaration>>
    where
        I: IntoIterator<Item = &'a ComponentDeclaration>,
    {
        let mut dependencies = IndexMap::new();
        for declaration in declarations {
            for service in &declaration.injected_services {
                if ignore.contains(&service.as_str()) || dependencies.contains_key(service) {
                    continue;
                }
                let dependency = self.get_service_declaration(service)?;
                dependencies.insert(service.clone(), dependency);
            }
        }
        Ok(dependencies)
    }

    /// Resolve from module queues instead of the live log
    ///
    /// Walks the standard modules and the named modules under introspection.
    /// Registrations made by config blocks and inline modules are not seen,
    /// and a `provider` registration yields the provider declaration rather
    /// than its `$get`.
    pub fn resolve_static(
        &self,
        provider_name: &str,
        component_name: &str,
    ) -> Result<Vec<ComponentDeclaration>> {
        let metadata = self
            .resolver
            .metadata()
            .get(provider_name)
            .ok_or_else(|| Error::provider_not_found(provider_name))?;
        let methods: Vec<&str> = metadata
            .registration_methods
            .iter()
            .map(String::as_str)
            .collect();
        let built_in_roots: Vec<&str> = self.built_in_roots.iter().map(String::as_str).collect();
        let roots: Vec<&str> = self.static_roots.iter().map(String::as_str).collect();
        let resolution = self.resolver.resolve_phased(
            &built_in_roots,
            &roots,
            provider_name,
            &methods,
            component_name,
        )?;
        Ok(resolution.into_declarations())
    }
}

impl std::fmt::Debug for ModuleIntrospector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleIntrospector")
            .field("built_in_roots", &self.built_in_roots)
            .field("static_roots", &self.static_roots)
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}
