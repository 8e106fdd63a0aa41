//! In-memory module registry

use std::sync::Arc;

use dashmap::DashMap;
use modscope_domain::entities::ModuleNode;
use modscope_domain::error::{Error, Result};
use modscope_domain::ports::ModuleRegistry;
use tracing::{debug, warn};

use super::standard;

/// Module namespace backed by a concurrent map
///
/// Each registry is independent; tests create one per test.
#[derive(Debug, Default)]
pub struct InMemoryModuleRegistry {
    modules: DashMap<String, Arc<ModuleNode>>,
}

impl InMemoryModuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the standard library and test-support modules
    pub fn with_standard_library() -> Self {
        let registry = Self::new();
        standard::install(&registry);
        registry
    }

    /// Insert a prebuilt module, replacing any module of the same name
    pub fn insert(&self, module: Arc<ModuleNode>) -> Arc<ModuleNode> {
        let name = module.name().to_string();
        if self.modules.insert(name.clone(), Arc::clone(&module)).is_some() {
            warn!(module = %name, "Module redefined; previous registrations are discarded");
        }
        debug!(module = %name, requires = ?module.requires(), "Module registered");
        module
    }

    /// Number of registered modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleRegistry for InMemoryModuleRegistry {
    fn create_module(&self, name: &str, requires: &[&str]) -> Result<Arc<ModuleNode>> {
        if name.is_empty() {
            return Err(Error::runtime("Module name cannot be empty"));
        }
        let requires = requires.iter().map(|r| (*r).to_string()).collect();
        Ok(self.insert(Arc::new(ModuleNode::new(name, requires))))
    }

    fn get_module(&self, name: &str) -> Option<Arc<ModuleNode>> {
        self.modules.get(name).map(|entry| Arc::clone(entry.value()))
    }

    fn module_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}
