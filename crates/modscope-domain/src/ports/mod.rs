//! Domain Port Interfaces
//!
//! Boundary contracts between the introspection core and the host
//! dependency-injection runtime. The application layer consumes these;
//! the infrastructure layer implements them.
//!
//! ## Organization
//!
//! - **registry** - module namespace (create and look up modules)
//! - **runtime** - graph construction, injector, registration capabilities

/// Module registry port
pub mod registry;
/// Host runtime ports
pub mod runtime;

pub use registry::ModuleRegistry;
pub use runtime::{
    CapabilityDecorator, ConfigStep, GraphStep, HostRuntime, Injector, RegistrationCapability,
};
