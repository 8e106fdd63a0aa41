//! Declarations and injectable functions
//!
//! A declaration is whatever a module hands to a registration method: a plain
//! value, a bare function, an annotated function (`[dep1, dep2, fn]`) or an
//! object such as a provider object with a `$get` member. Call shapes are
//! decoded into [`Declaration`] once, at the boundary, so the rest of the
//! system only deals with the normalized forms.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::constants::GET_MEMBER;
use crate::error::{Error, Result};
use crate::ports::runtime::{Injector, RegistrationCapability};
use crate::value_objects::registration::RegistrationCall;

/// Named values that replace injector lookups for a single invocation
pub type Locals = IndexMap<String, Instance>;

/// Body of an injectable function
pub type FunctionBody = dyn Fn(&Invocation<'_>) -> Result<Instance> + Send + Sync;

struct FunctionInner {
    name: Option<String>,
    params: Vec<String>,
    inject: Option<Vec<String>>,
    body: Arc<FunctionBody>,
}

/// An injectable function
///
/// Functions compare by identity: clones of one function are equal, two
/// functions built separately never are, even with identical parameters.
///
/// # Example
///
/// ```
/// use modscope_domain::value_objects::{Function, Instance};
///
/// let currency = Function::named("currencyFilter", ["$locale"], |_| Ok(Instance::value("¤")));
/// assert_eq!(currency.dependencies(), ["$locale".to_string()]);
/// assert_eq!(currency, currency.clone());
/// ```
#[derive(Clone)]
pub struct Function(Arc<FunctionInner>);

impl Function {
    /// Create an anonymous function with the given declared parameters
    pub fn new<P, S, F>(params: P, body: F) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Invocation<'_>) -> Result<Instance> + Send + Sync + 'static,
    {
        Self(Arc::new(FunctionInner {
            name: None,
            params: params.into_iter().map(Into::into).collect(),
            inject: None,
            body: Arc::new(body),
        }))
    }

    /// Create a named function with the given declared parameters
    pub fn named<N, P, S, F>(name: N, params: P, body: F) -> Self
    where
        N: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Invocation<'_>) -> Result<Instance> + Send + Sync + 'static,
    {
        Self(Arc::new(FunctionInner {
            name: Some(name.into()),
            params: params.into_iter().map(Into::into).collect(),
            inject: None,
            body: Arc::new(body),
        }))
    }

    /// Create a named function that ignores its arguments and returns `result`
    pub fn returning<N, P, S>(name: N, params: P, result: Instance) -> Self
    where
        N: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::named(name, params, move |_| Ok(result.clone()))
    }

    /// Attach an explicit injection list, replacing the declared parameters
    ///
    /// The result is a new function identity.
    #[must_use]
    pub fn with_inject<P, S>(self, inject: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Arc::new(FunctionInner {
            name: self.0.name.clone(),
            params: self.0.params.clone(),
            inject: Some(inject.into_iter().map(Into::into).collect()),
            body: Arc::clone(&self.0.body),
        }))
    }

    /// Diagnostic name, if any
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Declared parameter names
    pub fn params(&self) -> &[String] {
        &self.0.params
    }

    /// Explicit injection list, if one was attached
    pub fn inject(&self) -> Option<&[String]> {
        self.0.inject.as_deref()
    }

    /// Dependencies the injector resolves for this function, in argument order
    pub fn dependencies(&self) -> &[String] {
        self.inject().unwrap_or(&self.0.params)
    }

    /// Call the function with already-resolved arguments
    pub fn call(&self, invocation: &Invocation<'_>) -> Result<Instance> {
        (self.0.body)(invocation)
    }

    /// Whether both handles refer to the same function
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.0.name)
            .field("params", &self.0.params)
            .field("inject", &self.0.inject)
            .finish_non_exhaustive()
    }
}

/// The annotated-array form: dependency names followed by the function
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedFunction {
    /// Dependency names, in argument order
    pub dependencies: Vec<String>,
    /// The annotated function
    pub function: Function,
}

/// A registered declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// A plain value
    Value(Value),
    /// A bare function; dependencies come from its own annotation
    Function(Function),
    /// `[dep1, dep2, fn]`
    Annotated(AnnotatedFunction),
    /// An object, e.g. a provider object or component options
    Object(IndexMap<String, Declaration>),
}

impl Declaration {
    /// A plain value declaration
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// The annotated-array form
    pub fn annotated<P, S>(dependencies: P, function: Function) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Annotated(AnnotatedFunction {
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            function,
        })
    }

    /// An object declaration built from `(member, declaration)` pairs
    pub fn object<I, K, D>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: Into<Declaration>,
    {
        Self::Object(
            members
                .into_iter()
                .map(|(key, declaration)| (key.into(), declaration.into()))
                .collect(),
        )
    }

    /// A provider object: `{ $get: get }`
    pub fn provider_object(get: impl Into<Declaration>) -> Self {
        Self::object([(GET_MEMBER, get.into())])
    }

    /// Ordered dependency names of this declaration
    ///
    /// Values and objects have no dependencies. Duplicates are preserved,
    /// since this is the factory's argument order.
    pub fn annotate(&self) -> Vec<String> {
        match self {
            Self::Function(function) => function.dependencies().to_vec(),
            Self::Annotated(annotated) => annotated.dependencies.clone(),
            Self::Value(_) | Self::Object(_) => Vec::new(),
        }
    }

    /// The declaration with any leading dependency annotations removed
    pub fn strip(&self) -> Declaration {
        match self {
            Self::Annotated(annotated) => Self::Function(annotated.function.clone()),
            other => other.clone(),
        }
    }

    /// The underlying function of a bare or annotated declaration
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            Self::Annotated(annotated) => Some(&annotated.function),
            Self::Value(_) | Self::Object(_) => None,
        }
    }

    /// Whether the injector can invoke this declaration
    pub fn is_injectable(&self) -> bool {
        self.as_function().is_some()
    }

    /// A member of an object declaration
    pub fn member(&self, key: &str) -> Option<&Declaration> {
        match self {
            Self::Object(members) => members.get(key),
            _ => None,
        }
    }

    /// The plain value, if this is a value declaration
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Short name of the declaration shape, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Function(_) => "function",
            Self::Annotated(_) => "annotated function",
            Self::Object(_) => "object",
        }
    }
}

impl From<Value> for Declaration {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Function> for Declaration {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<AnnotatedFunction> for Declaration {
    fn from(annotated: AnnotatedFunction) -> Self {
        Self::Annotated(annotated)
    }
}

/// The provider-phase object produced for `XxxProvider`
///
/// Carries the `$get` declaration used to build the service and, for
/// capability providers, the registration methods the provider exposes.
#[derive(Clone, Default)]
pub struct ProviderInstance {
    get: Option<Declaration>,
    capability: Option<Arc<dyn RegistrationCapability>>,
}

impl ProviderInstance {
    /// A provider whose service is built by `get`
    pub fn new(get: Declaration) -> Self {
        Self {
            get: Some(get),
            capability: None,
        }
    }

    /// An intrinsic provider with registration methods and no `$get`
    pub fn intrinsic(capability: Arc<dyn RegistrationCapability>) -> Self {
        Self {
            get: None,
            capability: Some(capability),
        }
    }

    /// Attach (or replace) the registration capability
    #[must_use]
    pub fn with_capability(mut self, capability: Arc<dyn RegistrationCapability>) -> Self {
        self.capability = Some(capability);
        self
    }

    /// Build a provider from a provider object declaration (`{ $get: ... }`)
    pub fn from_object(declaration: &Declaration) -> Option<Self> {
        declaration.member(GET_MEMBER).cloned().map(Self::new)
    }

    /// The `$get` declaration
    pub fn get_declaration(&self) -> Option<&Declaration> {
        self.get.as_ref()
    }

    /// The registration capability
    pub fn capability(&self) -> Option<&Arc<dyn RegistrationCapability>> {
        self.capability.as_ref()
    }

    /// Call one of this provider's registration methods
    pub fn call(&self, injector: &dyn Injector, method: &str, call: RegistrationCall) -> Result<()> {
        let capability = self.capability.as_ref().ok_or_else(|| {
            Error::runtime(format!("Provider has no registration method '{method}'"))
        })?;
        capability.call(injector, method, call)
    }
}

impl fmt::Debug for ProviderInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderInstance")
            .field("get", &self.get)
            .field(
                "methods",
                &self.capability.as_ref().map(|capability| capability.methods()),
            )
            .finish()
    }
}

/// Result of invoking a declaration
#[derive(Debug, Clone)]
pub enum Instance {
    /// A plain value
    Value(Value),
    /// A declaration, e.g. a directive definition object or a filter function
    Declaration(Declaration),
    /// A provider-phase object
    Provider(ProviderInstance),
}

impl Instance {
    /// A plain value instance
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// The plain value, if this is a value instance
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The provider, if this is a provider instance
    pub fn as_provider(&self) -> Option<&ProviderInstance> {
        match self {
            Self::Provider(provider) => Some(provider),
            _ => None,
        }
    }

    /// The declaration, if this instance carries one
    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Self::Declaration(declaration) => Some(declaration),
            _ => None,
        }
    }

    /// Convert into a provider instance
    ///
    /// Accepts a provider instance or a provider object declaration.
    pub fn into_provider(self) -> Result<ProviderInstance> {
        match self {
            Self::Provider(provider) => Ok(provider),
            Self::Declaration(declaration) => ProviderInstance::from_object(&declaration)
                .ok_or_else(|| Error::runtime("Provider must define $get factory method")),
            Self::Value(_) => Err(Error::runtime("Provider must define $get factory method")),
        }
    }
}

impl From<Declaration> for Instance {
    fn from(declaration: Declaration) -> Self {
        match declaration {
            Declaration::Value(value) => Self::Value(value),
            other => Self::Declaration(other),
        }
    }
}

/// Arguments handed to a function body
pub struct Invocation<'a> {
    /// The injector performing the call
    pub injector: &'a dyn Injector,
    /// Resolved arguments, in dependency order
    pub args: Vec<Instance>,
}

impl<'a> Invocation<'a> {
    /// Create an invocation
    pub fn new(injector: &'a dyn Injector, args: Vec<Instance>) -> Self {
        Self { injector, args }
    }

    /// Argument at `index`
    pub fn arg(&self, index: usize) -> Result<&Instance> {
        self.args
            .get(index)
            .ok_or_else(|| Error::runtime(format!("Missing argument at position {index}")))
    }

    /// Provider argument at `index`
    pub fn provider(&self, index: usize) -> Result<&ProviderInstance> {
        self.arg(index)?
            .as_provider()
            .ok_or_else(|| Error::runtime(format!("Argument {index} is not a provider")))
    }
}
