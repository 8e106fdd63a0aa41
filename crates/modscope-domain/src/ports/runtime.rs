//! Host Runtime Ports
//!
//! Contracts of the two-phase dependency-injection runtime: building an
//! injector graph from modules and config steps, invoking declarations, and
//! the registration capabilities providers expose during the provider phase.
//!
//! ## Phases
//!
//! | Phase | Lookup | Contents |
//! |-------|--------|----------|
//! | Provider | [`Injector::provider`] | `XxxProvider` instances and constants |
//! | Instance | [`Injector::service`] | Services built from `$get` |

use std::sync::Arc;

use crate::error::Result;
use crate::value_objects::{Declaration, Instance, Locals, ProviderInstance, RegistrationCall};

/// Registration methods exposed by a provider, e.g. `$provide` or `$compileProvider`
pub trait RegistrationCapability: Send + Sync {
    /// Names of the registration methods this capability accepts
    fn methods(&self) -> Vec<String>;

    /// Perform a registration
    ///
    /// `injector` is the injector the registration applies to.
    fn call(&self, injector: &dyn Injector, method: &str, call: RegistrationCall) -> Result<()>;
}

/// A configuration step run during the provider phase
pub trait ConfigStep: Send + Sync {
    /// Run the step against the injector being built
    fn configure(&self, injector: &dyn Injector) -> Result<()>;
}

impl<F> ConfigStep for F
where
    F: Fn(&dyn Injector) -> Result<()> + Send + Sync,
{
    fn configure(&self, injector: &dyn Injector) -> Result<()> {
        self(injector)
    }
}

/// Decorator applied to a provider's registration capability
pub type CapabilityDecorator<'a> =
    &'a dyn Fn(Arc<dyn RegistrationCapability>) -> Arc<dyn RegistrationCapability>;

/// Injector of a built module graph
pub trait Injector: Send + Sync {
    /// Ordered dependency names of a declaration
    fn annotate(&self, declaration: &Declaration) -> Vec<String> {
        declaration.annotate()
    }

    /// Whether the provider phase knows `name`
    fn has_provider(&self, name: &str) -> bool;

    /// Provider-phase lookup of `XxxProvider`
    fn provider(&self, name: &str) -> Result<ProviderInstance>;

    /// Register (or replace) a provider under its full `XxxProvider` name
    fn define_provider(&self, name: &str, provider: ProviderInstance) -> Result<()>;

    /// Register a constant, visible in both phases
    fn define_constant(&self, name: &str, value: Declaration) -> Result<()>;

    /// Whether `name` was registered as a constant
    fn has_constant(&self, name: &str) -> bool;

    /// Replace the registration capability of provider `name` with `decorate(current)`
    fn decorate_capability(&self, name: &str, decorate: CapabilityDecorator<'_>) -> Result<()>;

    /// Produce a provider instance from a provider declaration
    ///
    /// Provider objects are used as-is; constructors are invoked with
    /// provider-phase dependencies, `locals` taking precedence.
    fn instantiate_provider(
        &self,
        declaration: &Declaration,
        locals: &Locals,
    ) -> Result<ProviderInstance>;

    /// Invoke a declaration with instance-phase dependencies, `locals` taking precedence
    fn invoke(&self, declaration: &Declaration, locals: &Locals) -> Result<Instance>;

    /// Instance-phase lookup, building the service on first use
    fn service(&self, name: &str) -> Result<Instance>;
}

/// One step of graph construction
#[derive(Clone)]
pub enum GraphStep {
    /// Load a module (and its requires) by name
    Module(String),
    /// Run a configuration step
    Config(Arc<dyn ConfigStep>),
}

impl GraphStep {
    /// A config step from a closure or [`ConfigStep`] implementation
    pub fn config(step: impl ConfigStep + 'static) -> Self {
        Self::Config(Arc::new(step))
    }
}

impl std::fmt::Debug for GraphStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Module(name) => f.debug_tuple("Module").field(name).finish(),
            Self::Config(_) => f.write_str("Config(..)"),
        }
    }
}

/// Host runtime port: builds injector graphs
pub trait HostRuntime: Send + Sync {
    /// Process `steps` in order, draining each module's registration queue
    fn build_graph(&self, steps: Vec<GraphStep>) -> Result<Arc<dyn Injector>>;
}
