//! Module graph vertex
//!
//! A [`ModuleNode`] is created once per module name and records, in order,
//! every registration call made against it. The registration methods take
//! `&self` and return `&Self`, so modules are declared fluently:
//!
//! ```
//! use modscope_domain::entities::ModuleNode;
//! use modscope_domain::value_objects::Declaration;
//!
//! let module = ModuleNode::new("app", vec!["ng".to_string()]);
//! module
//!     .constant("apiRoot", Declaration::value("/api"))
//!     .value("retries", Declaration::value(3));
//! assert_eq!(module.registrations().len(), 2);
//! ```

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::constants::{
    ANIMATE_PROVIDER, COMPILE_PROVIDER, CONTROLLER_PROVIDER, FILTER_PROVIDER, METHOD_COMPONENT,
    METHOD_CONSTANT, METHOD_DIRECTIVE, METHOD_FACTORY, METHOD_PROVIDER, METHOD_REGISTER,
    METHOD_SERVICE, METHOD_VALUE, PROVIDE,
};
use crate::ports::runtime::ConfigStep;
use crate::value_objects::{Declaration, RegistrationArgument, RegistrationCall, RegistrationEntry};

/// A named module with its requires, registration queue and config blocks
pub struct ModuleNode {
    name: String,
    requires: Vec<String>,
    standard: bool,
    registrations: RwLock<Vec<RegistrationEntry>>,
    config_blocks: RwLock<Vec<Arc<dyn ConfigStep>>>,
}

impl ModuleNode {
    /// Create a user module
    pub fn new(name: impl Into<String>, requires: Vec<String>) -> Self {
        Self {
            name: name.into(),
            requires,
            standard: false,
            registrations: RwLock::new(Vec::new()),
            config_blocks: RwLock::new(Vec::new()),
        }
    }

    /// Create a module belonging to the runtime's standard library
    pub fn standard(name: impl Into<String>, requires: Vec<String>) -> Self {
        Self {
            standard: true,
            ..Self::new(name, requires)
        }
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of required modules, in declaration order
    pub fn requires(&self) -> &[String] {
        &self.requires
    }

    /// Whether the module belongs to the standard library
    pub fn is_standard(&self) -> bool {
        self.standard
    }

    /// Registration entries in push order
    pub fn registrations(&self) -> Vec<RegistrationEntry> {
        self.registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Registration entries in the order the runtime drains them
    ///
    /// `$provide` constants go to the front of the queue as they are pushed,
    /// so they come first with the most recent constant leading. Everything
    /// else keeps push order.
    pub fn drain_order(&self) -> Vec<RegistrationEntry> {
        let entries = self.registrations();
        let (mut constants, rest): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(RegistrationEntry::is_constant);
        constants.reverse();
        constants.extend(rest);
        constants
    }

    /// Config blocks in registration order
    pub fn config_blocks(&self) -> Vec<Arc<dyn ConfigStep>> {
        self.config_blocks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Queue a decoded registration call
    pub fn queue(&self, provider_name: &str, method: &str, call: RegistrationCall) -> &Self {
        self.push(RegistrationEntry::from_call(provider_name, method, &call))
    }

    /// Queue a registration call with raw arguments
    ///
    /// Arguments are decoded when the runtime drains the queue, so a
    /// malformed call surfaces then.
    pub fn invoke_later(
        &self,
        provider_name: &str,
        method: &str,
        arguments: Vec<RegistrationArgument>,
    ) -> &Self {
        self.push(RegistrationEntry::new(provider_name, method, arguments))
    }

    fn push(&self, entry: RegistrationEntry) -> &Self {
        self.registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
        self
    }

    /// Register a constant
    pub fn constant(&self, name: &str, declaration: impl Into<Declaration>) -> &Self {
        self.queue(PROVIDE, METHOD_CONSTANT, RegistrationCall::named(name, declaration))
    }

    /// Register a value
    pub fn value(&self, name: &str, declaration: impl Into<Declaration>) -> &Self {
        self.queue(PROVIDE, METHOD_VALUE, RegistrationCall::named(name, declaration))
    }

    /// Register a service constructor
    pub fn service(&self, name: &str, declaration: impl Into<Declaration>) -> &Self {
        self.queue(PROVIDE, METHOD_SERVICE, RegistrationCall::named(name, declaration))
    }

    /// Register a service factory
    pub fn factory(&self, name: &str, declaration: impl Into<Declaration>) -> &Self {
        self.queue(PROVIDE, METHOD_FACTORY, RegistrationCall::named(name, declaration))
    }

    /// Register a provider
    pub fn provider(&self, name: &str, declaration: impl Into<Declaration>) -> &Self {
        self.queue(PROVIDE, METHOD_PROVIDER, RegistrationCall::named(name, declaration))
    }

    /// Register a filter factory
    pub fn filter(&self, name: &str, declaration: impl Into<Declaration>) -> &Self {
        self.queue(
            FILTER_PROVIDER,
            METHOD_REGISTER,
            RegistrationCall::named(name, declaration),
        )
    }

    /// Register a controller constructor
    pub fn controller(&self, name: &str, declaration: impl Into<Declaration>) -> &Self {
        self.queue(
            CONTROLLER_PROVIDER,
            METHOD_REGISTER,
            RegistrationCall::named(name, declaration),
        )
    }

    /// Register a directive factory
    pub fn directive(&self, name: &str, declaration: impl Into<Declaration>) -> &Self {
        self.queue(
            COMPILE_PROVIDER,
            METHOD_DIRECTIVE,
            RegistrationCall::named(name, declaration),
        )
    }

    /// Register a component options object
    pub fn component(&self, name: &str, options: impl Into<Declaration>) -> &Self {
        self.queue(
            COMPILE_PROVIDER,
            METHOD_COMPONENT,
            RegistrationCall::named(name, options),
        )
    }

    /// Register an animation factory
    pub fn animation(&self, name: &str, declaration: impl Into<Declaration>) -> &Self {
        self.queue(
            ANIMATE_PROVIDER,
            METHOD_REGISTER,
            RegistrationCall::named(name, declaration),
        )
    }

    /// Add a config block, run after this module's registrations are drained
    pub fn config(&self, step: impl ConfigStep + 'static) -> &Self {
        self.config_arc(Arc::new(step))
    }

    /// Add a shared config block
    pub fn config_arc(&self, step: Arc<dyn ConfigStep>) -> &Self {
        self.config_blocks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(step);
        self
    }
}

impl fmt::Debug for ModuleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleNode")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .field("standard", &self.standard)
            .field("registrations", &self.registrations().len())
            .field("config_blocks", &self.config_blocks().len())
            .finish()
    }
}
