//! # modscope
//!
//! Declaration resolution and module introspection for an
//! AngularJS-style dependency-injection module system.
//!
//! This crate is the public entry point. It re-exports the layer crates and
//! wires them together in [`Modscope`].
//!
//! ## Example
//!
//! ```ignore
//! use modscope::{Modscope, ModuleRegistry};
//! use modscope::domain::value_objects::Declaration;
//!
//! let modscope = Modscope::new();
//! modscope.module("app", &[])?.value("greeting", Declaration::value("hello"));
//!
//! let introspector = modscope.introspect(["app"])?;
//! let greeting = introspector.get_service_declaration("greeting")?;
//! assert!(!greeting.built_in);
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Declarations, module graph, registration calls, runtime ports and errors
//! - `application` - Static resolver, registration log and module introspector
//! - `infrastructure` - In-memory host runtime, standard library modules, config, logging

/// Domain layer - declarations, module graph and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use modscope_domain::*;
}

/// Application layer - resolution and introspection
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use modscope_application::*;
}

/// Infrastructure layer - host runtime, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use modscope_infrastructure::*;
}

pub mod bootstrap;

pub use bootstrap::{Modscope, module_introspector, options_from_config};

// Commonly used types at the crate root
pub use modscope_application::{
    DeclarationResolver, IntrospectionOptions, ModuleIntrospector, ModuleSpec,
    ProviderMetadataTable, Resolution,
};
pub use modscope_domain::error::{Error, Result};
pub use modscope_domain::ports::{HostRuntime, Injector, ModuleRegistry};
pub use modscope_domain::value_objects::{
    ComponentDeclaration, Declaration, DeclarationOrigin, ProviderDeclaration,
};
pub use modscope_infrastructure::config::{AppConfig, ConfigLoader};
pub use modscope_infrastructure::{InMemoryHostRuntime, InMemoryModuleRegistry};
