//! Resolved declaration records

use crate::constants::{PROVIDE, is_constant_registration};
use crate::value_objects::declaration::Declaration;

/// The winning (or accumulated) declaration of a registered component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDeclaration {
    /// Registration method that produced this record
    pub provider_method: String,
    /// Registered component name
    pub component_name: String,
    /// Declaration as registered
    pub raw_declaration: Declaration,
    /// Declaration with dependency annotations removed
    pub stripped_declaration: Declaration,
    /// Factory argument order, duplicates preserved
    pub injected_services: Vec<String>,
    /// Whether the runtime's standard library registered it
    pub built_in: bool,
}

impl ComponentDeclaration {
    /// Build a record, deriving the stripped declaration and injected services
    pub fn new(
        provider_method: impl Into<String>,
        component_name: impl Into<String>,
        raw_declaration: Declaration,
        built_in: bool,
    ) -> Self {
        let stripped_declaration = raw_declaration.strip();
        let injected_services = raw_declaration.annotate();
        Self {
            provider_method: provider_method.into(),
            component_name: component_name.into(),
            raw_declaration,
            stripped_declaration,
            injected_services,
            built_in,
        }
    }

    /// Whether this record came from `$provide.constant`
    ///
    /// Only `$provide` uses the `constant` method, so the method alone decides.
    pub fn is_constant(&self) -> bool {
        is_constant_registration(PROVIDE, &self.provider_method)
    }
}

/// Declaration of a provider itself (the object or constructor passed to `provider`)
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderDeclaration {
    /// Declaration as registered
    pub raw_declaration: Declaration,
    /// Declaration with dependency annotations removed
    pub stripped_declaration: Declaration,
    /// Providers injected into the provider constructor
    pub injected_providers: Vec<String>,
    /// Whether the runtime's standard library registered it
    pub built_in: bool,
}

impl ProviderDeclaration {
    /// Build a record from the registered declaration
    pub fn new(raw_declaration: Declaration, built_in: bool) -> Self {
        Self {
            stripped_declaration: raw_declaration.strip(),
            injected_providers: raw_declaration.annotate(),
            raw_declaration,
            built_in,
        }
    }
}

/// Where a service declaration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationOrigin {
    /// Registered by a module under introspection
    UserDefined,
    /// Registered only by the standard library
    BuiltIn,
    /// Not registered anywhere in the graph
    Undeclared,
}

impl DeclarationOrigin {
    /// Whether any declaration exists
    pub fn is_declared(self) -> bool {
        !matches!(self, Self::Undeclared)
    }
}
