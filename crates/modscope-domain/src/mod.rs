//! # Domain Layer
//!
//! Core types for module introspection: declarations, registration calls,
//! the module graph and the ports through which the host dependency-injection
//! runtime is consumed.
//!
//! ## Architecture
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`entities`] | Module graph vertices with identity |
//! | [`value_objects`] | Declarations, registration calls, resolved records |
//! | [`ports`] | Host runtime contracts (registry, injector, capabilities) |
//! | [`constants`] | Provider and method names shared by every layer |
//! | [`error`] | Domain error types |
//!
//! ## Example
//!
//! ```ignore
//! use modscope_domain::value_objects::{Declaration, Function, Instance};
//!
//! let factory = Function::named("greeter", ["$log"], |_| Ok(Instance::value("hi")));
//! let declaration = Declaration::annotated(["$log"], factory.clone());
//!
//! assert_eq!(declaration.annotate(), vec!["$log".to_string()]);
//! assert_eq!(declaration.strip(), Declaration::Function(factory));
//! ```

/// Provider and method name constants
pub mod constants;
/// Module graph entities
pub mod entities;
/// Domain error types
pub mod error;
/// Host runtime ports
pub mod ports;
/// Immutable value objects
pub mod value_objects;

// Re-export commonly used types for convenience
pub use constants::*;
pub use entities::*;
pub use error::{Error, Result};
pub use value_objects::*;
