//! Module Registry Port
//!
//! The name-to-module namespace of the host runtime. It is passed into every
//! consumer rather than held globally, so each test can work against a fresh
//! registry.

use std::sync::Arc;

use crate::entities::ModuleNode;
use crate::error::{Error, Result};

/// Module registry port
///
/// # Example
///
/// ```ignore
/// let app = registry.create_module("app", &["ng"])?;
/// app.value("greeting", Declaration::value("hello"));
/// assert!(registry.has_module("app"));
/// ```
pub trait ModuleRegistry: Send + Sync {
    /// Create a module, replacing any module previously registered under `name`
    fn create_module(&self, name: &str, requires: &[&str]) -> Result<Arc<ModuleNode>>;

    /// Look up a module by name
    fn get_module(&self, name: &str) -> Option<Arc<ModuleNode>>;

    /// Whether a module is registered under `name`
    fn has_module(&self, name: &str) -> bool {
        self.get_module(name).is_some()
    }

    /// Names of all registered modules
    fn module_names(&self) -> Vec<String>;

    /// Look up a module, failing when it is not registered
    fn require_module(&self, name: &str) -> Result<Arc<ModuleNode>> {
        self.get_module(name).ok_or_else(|| {
            Error::runtime(format!(
                "Module '{name}' is not available! You either misspelled the module name or forgot to load it."
            ))
        })
    }
}
