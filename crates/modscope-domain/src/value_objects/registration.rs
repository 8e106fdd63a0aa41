//! Registration calls
//!
//! Registration methods accept two call shapes: `method(name, declaration)`
//! and `method({ name: declaration, ... })`. The raw arguments are kept on the
//! queued [`RegistrationEntry`]; [`RegistrationCall::decode`] turns them into a
//! tagged union and [`RegistrationCall::into_items`] flattens both shapes into
//! single `(name, declaration)` items.

use indexmap::IndexMap;

use crate::constants::is_constant_registration;
use crate::error::{Error, Result};
use crate::value_objects::declaration::Declaration;

/// One raw argument of a registration call
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationArgument {
    /// A component name
    Name(String),
    /// A declaration
    Declaration(Declaration),
    /// A map of component names to declarations
    Map(IndexMap<String, Declaration>),
}

/// A decoded registration call
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationCall {
    /// `method(name, declaration)`
    Named {
        /// Component name
        name: String,
        /// Registered declaration
        declaration: Declaration,
    },
    /// `method({ name: declaration, ... })`
    Map(IndexMap<String, Declaration>),
}

impl RegistrationCall {
    /// A single-item call
    pub fn named(name: impl Into<String>, declaration: impl Into<Declaration>) -> Self {
        Self::Named {
            name: name.into(),
            declaration: declaration.into(),
        }
    }

    /// A batch call from `(name, declaration)` pairs
    pub fn map<I, K, D>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: Into<Declaration>,
    {
        Self::Map(
            items
                .into_iter()
                .map(|(name, declaration)| (name.into(), declaration.into()))
                .collect(),
        )
    }

    /// Decode raw arguments
    ///
    /// Accepts exactly `[Name, Declaration]` or `[Map]`.
    pub fn decode(arguments: &[RegistrationArgument]) -> Result<Self> {
        match arguments {
            [RegistrationArgument::Name(name), RegistrationArgument::Declaration(declaration)] => {
                Ok(Self::Named {
                    name: name.clone(),
                    declaration: declaration.clone(),
                })
            }
            [RegistrationArgument::Map(items)] => Ok(Self::Map(items.clone())),
            other => Err(Error::malformed_registration(format!(
                "expected (name, declaration) or a single map of declarations, got {} argument(s)",
                other.len()
            ))),
        }
    }

    /// Raw argument form of this call
    pub fn to_arguments(&self) -> Vec<RegistrationArgument> {
        match self {
            Self::Named { name, declaration } => vec![
                RegistrationArgument::Name(name.clone()),
                RegistrationArgument::Declaration(declaration.clone()),
            ],
            Self::Map(items) => vec![RegistrationArgument::Map(items.clone())],
        }
    }

    /// Normalize into single `(name, declaration)` items, in call order
    pub fn into_items(self) -> Vec<(String, Declaration)> {
        match self {
            Self::Named { name, declaration } => vec![(name, declaration)],
            Self::Map(items) => items.into_iter().collect(),
        }
    }

    /// Declaration registered under `name` by this call, if any
    ///
    /// When a map names the item, the map entry is returned.
    pub fn find(&self, item_name: &str) -> Option<&Declaration> {
        match self {
            Self::Named { name, declaration } if name == item_name => Some(declaration),
            Self::Named { .. } => None,
            Self::Map(items) => items.get(item_name),
        }
    }
}

/// One queued registration call on a module
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationEntry {
    /// Provider owning the registration method, e.g. `$provide`
    pub provider_name: String,
    /// Registration method, e.g. `constant`
    pub method: String,
    /// Raw invocation arguments
    pub arguments: Vec<RegistrationArgument>,
}

impl RegistrationEntry {
    /// Create an entry from raw arguments
    pub fn new(
        provider_name: impl Into<String>,
        method: impl Into<String>,
        arguments: Vec<RegistrationArgument>,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            method: method.into(),
            arguments,
        }
    }

    /// Create an entry from a decoded call
    pub fn from_call(
        provider_name: impl Into<String>,
        method: impl Into<String>,
        call: &RegistrationCall,
    ) -> Self {
        Self::new(provider_name, method, call.to_arguments())
    }

    /// Decode the raw arguments
    pub fn call(&self) -> Result<RegistrationCall> {
        RegistrationCall::decode(&self.arguments)
    }

    /// Whether this is a `$provide.constant` registration
    pub fn is_constant(&self) -> bool {
        is_constant_registration(&self.provider_name, &self.method)
    }
}
