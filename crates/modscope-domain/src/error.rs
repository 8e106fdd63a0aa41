//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for modscope
#[derive(Error, Debug)]
pub enum Error {
    /// No declaration exists for a (provider, component) pair
    #[error("Could not find registered component \"{component}\" for provider: {provider}")]
    ComponentNotFound {
        /// The requested component name
        component: String,
        /// The provider the component was looked up under
        provider: String,
    },

    /// No provider declaration exists under this name
    #[error("Could not find provider: {provider}")]
    ProviderNotFound {
        /// The requested provider name
        provider: String,
    },

    /// A component was requested through an accessor for a different registration kind
    #[error(
        "Component \"{component}\" was registered as a {actual}, but was requested as a {expected}"
    )]
    ShapeMismatch {
        /// The requested component name
        component: String,
        /// The registration kind the accessor assumes
        expected: String,
        /// The registration kind that was actually recorded
        actual: String,
    },

    /// Registration arguments had an unexpected arity or shape
    #[error("Malformed registration: {message}")]
    MalformedRegistration {
        /// Description of the malformed call
        message: String,
    },

    /// Host runtime failure (unknown module or provider, missing `$get`, cycles)
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the runtime failure
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error (poisoned locks and similar invariant breaks)
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Lookup error creation methods
impl Error {
    /// Create a component not found error
    pub fn component_not_found<C: Into<String>, P: Into<String>>(component: C, provider: P) -> Self {
        Self::ComponentNotFound {
            component: component.into(),
            provider: provider.into(),
        }
    }

    /// Create a provider not found error
    pub fn provider_not_found<S: Into<String>>(provider: S) -> Self {
        Self::ProviderNotFound {
            provider: provider.into(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch<C, E, A>(component: C, expected: E, actual: A) -> Self
    where
        C: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Self::ShapeMismatch {
            component: component.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a malformed registration error
    pub fn malformed_registration<S: Into<String>>(message: S) -> Self {
        Self::MalformedRegistration {
            message: message.into(),
        }
    }
}

// Runtime and infrastructure error creation methods
impl Error {
    /// Create a host runtime error
    pub fn runtime<S: Into<String>>(message: S) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification
impl Error {
    /// Whether this error reports a missing component or provider
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ComponentNotFound { .. } | Self::ProviderNotFound { .. }
        )
    }

    /// Create an internal error for a poisoned lock
    pub fn poisoned(what: &str) -> Self {
        Self::internal(format!("Lock poisoned: {what}"))
    }
}
