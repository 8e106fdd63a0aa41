//! Static declaration resolver
//!
//! Answers "which declaration wins for this name" by walking module
//! registration queues without building an injector. Modules are visited
//! depth-first, requires before the module itself, each module once. Within a
//! module, constants are drained first in reverse order, then everything
//! else in queue order, matching how the host runtime drains the queue.
//!
//! Registrations made from config blocks are invisible to this walk.

use std::collections::HashSet;
use std::sync::Arc;

use modscope_domain::error::Result;
use modscope_domain::ports::ModuleRegistry;
use modscope_domain::value_objects::ComponentDeclaration;
use tracing::trace;

use super::resolution::Resolution;
use crate::ports::registry::ProviderMetadataTable;

/// What a resolution walk is looking for
struct Target<'a> {
    provider_name: &'a str,
    methods: &'a [&'a str],
    item_name: &'a str,
    overrides: bool,
}

impl Target<'_> {
    fn matches(&self, provider_name: &str, method: &str) -> bool {
        provider_name == self.provider_name && self.methods.contains(&method)
    }
}

/// Resolves declarations from module queues
#[derive(Clone)]
pub struct DeclarationResolver {
    registry: Arc<dyn ModuleRegistry>,
    metadata: ProviderMetadataTable,
}

impl DeclarationResolver {
    /// Create a resolver over `registry`
    pub fn new(registry: Arc<dyn ModuleRegistry>, metadata: ProviderMetadataTable) -> Self {
        Self { registry, metadata }
    }

    /// Resolver using only the built-in provider metadata
    pub fn with_built_in_metadata(registry: Arc<dyn ModuleRegistry>) -> Self {
        Self::new(registry, ProviderMetadataTable::built_in())
    }

    /// Provider metadata in use
    pub fn metadata(&self) -> &ProviderMetadataTable {
        &self.metadata
    }

    /// Resolve `item_name` registered on `provider_name` through any of `methods`
    ///
    /// Returns the effective declaration, or `None` if no module in the
    /// graph of `root` registers the item.
    pub fn resolve(
        &self,
        root: &str,
        provider_name: &str,
        methods: &[&str],
        item_name: &str,
    ) -> Result<Option<ComponentDeclaration>> {
        let resolution = self.resolve_from(&[root], provider_name, methods, item_name)?;
        Ok(resolution.winner().cloned())
    }

    /// Like [`Self::resolve`], returning every kept declaration
    ///
    /// Only non-overriding providers can yield more than one.
    pub fn resolve_all(
        &self,
        root: &str,
        provider_name: &str,
        methods: &[&str],
        item_name: &str,
    ) -> Result<Vec<ComponentDeclaration>> {
        let resolution = self.resolve_from(&[root], provider_name, methods, item_name)?;
        Ok(resolution.into_declarations())
    }

    /// Resolve across several roots sharing one visited set
    ///
    /// Roots are walked in order, so a later root's registrations override
    /// an earlier root's.
    pub fn resolve_from(
        &self,
        roots: &[&str],
        provider_name: &str,
        methods: &[&str],
        item_name: &str,
    ) -> Result<Resolution> {
        let target = self.target(provider_name, methods, item_name);
        let mut visited = HashSet::new();
        let mut resolution = Resolution::new();
        for root in roots {
            self.visit(root, &target, None, &mut visited, &mut resolution)?;
        }
        Ok(resolution)
    }

    /// Like [`Self::resolve_from`], tagging built-in by load phase
    ///
    /// Modules reached from `built_in_roots` are built-in and everything
    /// first reached from `roots` is not, whether or not it belongs to the
    /// standard library. This matches how a live graph loads the standard
    /// library ahead of the modules under introspection.
    pub fn resolve_phased(
        &self,
        built_in_roots: &[&str],
        roots: &[&str],
        provider_name: &str,
        methods: &[&str],
        item_name: &str,
    ) -> Result<Resolution> {
        let target = self.target(provider_name, methods, item_name);
        let mut visited = HashSet::new();
        let mut resolution = Resolution::new();
        for root in built_in_roots {
            self.visit(root, &target, Some(true), &mut visited, &mut resolution)?;
        }
        for root in roots {
            self.visit(root, &target, Some(false), &mut visited, &mut resolution)?;
        }
        Ok(resolution)
    }

    fn target<'a>(
        &self,
        provider_name: &'a str,
        methods: &'a [&'a str],
        item_name: &'a str,
    ) -> Target<'a> {
        Target {
            provider_name,
            methods,
            item_name,
            overrides: self.metadata.overrides(provider_name),
        }
    }

    fn visit(
        &self,
        module_name: &str,
        target: &Target<'_>,
        phase: Option<bool>,
        visited: &mut HashSet<String>,
        resolution: &mut Resolution,
    ) -> Result<()> {
        if !visited.insert(module_name.to_string()) {
            return Ok(());
        }
        let module = self.registry.require_module(module_name)?;
        for required in module.requires() {
            self.visit(required, target, phase, visited, resolution)?;
        }
        // Without a phase, the standard library counts as built-in
        let built_in = phase.unwrap_or_else(|| module.is_standard());

        for entry in module.drain_order() {
            if !target.matches(&entry.provider_name, &entry.method) {
                continue;
            }
            let call = entry.call()?;
            let Some(declaration) = call.find(target.item_name) else {
                continue;
            };
            let candidate = ComponentDeclaration::new(
                entry.method.as_str(),
                target.item_name,
                declaration.clone(),
                built_in,
            );
            let kept = resolution.offer(candidate, target.overrides);
            trace!(
                module = module_name,
                provider = target.provider_name,
                method = %entry.method,
                item = target.item_name,
                kept,
                "Resolution candidate"
            );
        }
        Ok(())
    }
}

impl std::fmt::Debug for DeclarationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclarationResolver")
            .field("modules", &self.registry.module_names())
            .field("metadata", &self.metadata)
            .finish()
    }
}
