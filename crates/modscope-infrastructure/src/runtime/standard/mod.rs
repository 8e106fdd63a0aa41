//! Standard library modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | `ng` | Core providers, the four registration providers, built-in filters and directives |
//! | `ngMock` | Test doubles for `$browser`, `$exceptionHandler`, `$log` and `$httpBackend` |
//!
//! Service bodies are inert: they return a marker value. What matters for
//! introspection is each declaration's shape and dependency list, and that
//! every dependency can be built.

pub mod capabilities;
pub mod ng;
pub mod ng_mock;

use std::sync::Arc;

use modscope_domain::constants::GET_MEMBER;
use modscope_domain::value_objects::{Declaration, Function, Instance};
use serde_json::Value;

use super::registry::InMemoryModuleRegistry;

pub use capabilities::{AnimateCapability, CompileCapability, ControllerCapability, FilterCapability};

/// Register the standard modules in `registry`
pub fn install(registry: &InMemoryModuleRegistry) {
    registry.insert(Arc::new(ng::module()));
    registry.insert(Arc::new(ng_mock::module()));
}

/// A `$get` function with declared parameters, returning a marker for `service`
pub(crate) fn getter(service: &str, params: &[&str]) -> Function {
    Function::returning(
        GET_MEMBER,
        params.iter().copied(),
        Instance::value(Value::String(service.to_string())),
    )
}

/// `[deps..., $get]`
pub(crate) fn annotated_getter(service: &str, dependencies: &[&str]) -> Declaration {
    Declaration::annotated(dependencies.iter().copied(), getter(service, &[]))
}

/// A provider constructor without registration methods
pub(crate) fn plain_provider(constructor: &str, get: Declaration) -> Declaration {
    Function::named(constructor, Vec::<String>::new(), move |_| {
        Ok(Instance::Declaration(Declaration::provider_object(get.clone())))
    })
    .into()
}
