//! Domain Value Objects
//!
//! Immutable values describing what modules register and what resolution
//! produces. Functions compare by identity; everything else compares by value.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Declaration`] | A registered value, function, annotated function or object |
//! | [`Function`] | An injectable function with declared dependencies |
//! | [`Instance`] | The result of invoking a declaration |
//! | [`ProviderInstance`] | Provider-phase object with `$get` and registration methods |
//! | [`RegistrationCall`] | Decoded `(name, declaration)` or map call |
//! | [`RegistrationEntry`] | A queued registration on a module |
//! | [`ComponentDeclaration`] | A resolved component record |
//! | [`ProviderDeclaration`] | A resolved provider record |
//! | [`ProviderRegistrationMetadata`] | Registration methods and override policy of a provider |

/// Resolved declaration records
pub mod component;
/// Declarations, functions and instances
pub mod declaration;
/// Provider registration metadata
pub mod metadata;
/// Registration call shapes
pub mod registration;

pub use component::{ComponentDeclaration, DeclarationOrigin, ProviderDeclaration};
pub use declaration::{
    AnnotatedFunction, Declaration, Function, FunctionBody, Instance, Invocation, Locals,
    ProviderInstance,
};
pub use metadata::ProviderRegistrationMetadata;
pub use registration::{RegistrationArgument, RegistrationCall, RegistrationEntry};
