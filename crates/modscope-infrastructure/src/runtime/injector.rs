//! Two-phase injector
//!
//! The provider phase holds `XxxProvider` instances and constants; it is what
//! config steps and provider constructors see. The instance phase builds
//! services lazily from each provider's `$get` and caches them.
//!
//! Locks guard the caches only for the duration of a map access. They are
//! never held while a declaration body or capability runs, because those
//! call back into the injector.

use std::sync::{Mutex, RwLock};

use indexmap::IndexMap;
use modscope_domain::constants::provider_name_for;
use modscope_domain::error::{Error, Result};
use modscope_domain::ports::{CapabilityDecorator, Injector};
use modscope_domain::value_objects::{Declaration, Instance, Invocation, Locals, ProviderInstance};
use tracing::trace;

/// Injector of one built module graph
#[derive(Default)]
pub struct GraphInjector {
    providers: RwLock<IndexMap<String, ProviderInstance>>,
    constants: RwLock<IndexMap<String, Declaration>>,
    instances: RwLock<IndexMap<String, Instance>>,
    instantiating: Mutex<Vec<String>>,
}

impl GraphInjector {
    /// Create an empty injector
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of every provider known to the provider phase
    pub fn provider_names(&self) -> Result<Vec<String>> {
        Ok(self
            .providers
            .read()
            .map_err(|_| Error::poisoned("injector providers"))?
            .keys()
            .cloned()
            .collect())
    }

    fn lookup_provider(&self, name: &str) -> Result<Option<ProviderInstance>> {
        Ok(self
            .providers
            .read()
            .map_err(|_| Error::poisoned("injector providers"))?
            .get(name)
            .cloned())
    }

    fn lookup_constant(&self, name: &str) -> Result<Option<Declaration>> {
        Ok(self
            .constants
            .read()
            .map_err(|_| Error::poisoned("injector constants"))?
            .get(name)
            .cloned())
    }

    /// A provider-phase dependency: a provider by full name, or a constant
    fn provider_dependency(&self, name: &str) -> Result<Instance> {
        if let Some(constant) = self.lookup_constant(name)? {
            return Ok(Instance::from(constant));
        }
        match self.lookup_provider(name)? {
            Some(provider) => Ok(Instance::Provider(provider)),
            None => Err(Error::runtime(format!("Unknown provider: {name}"))),
        }
    }

    fn resolve_arguments<F>(
        &self,
        declaration: &Declaration,
        locals: &Locals,
        mut resolve: F,
    ) -> Result<Vec<Instance>>
    where
        F: FnMut(&str) -> Result<Instance>,
    {
        self.annotate(declaration)
            .iter()
            .map(|dependency| match locals.get(dependency) {
                Some(local) => Ok(local.clone()),
                None => resolve(dependency),
            })
            .collect()
    }

    fn enter(&self, name: &str) -> Result<()> {
        let mut path = self
            .instantiating
            .lock()
            .map_err(|_| Error::poisoned("injector instantiation path"))?;
        if path.iter().any(|pending| pending == name) {
            let mut cycle: Vec<&str> = path.iter().map(String::as_str).collect();
            cycle.push(name);
            return Err(Error::runtime(format!(
                "Circular dependency found: {}",
                cycle.join(" <- ")
            )));
        }
        path.push(name.to_string());
        Ok(())
    }

    fn leave(&self, name: &str) -> Result<()> {
        let mut path = self
            .instantiating
            .lock()
            .map_err(|_| Error::poisoned("injector instantiation path"))?;
        if let Some(position) = path.iter().rposition(|pending| pending == name) {
            path.remove(position);
        }
        Ok(())
    }

    fn build_service(&self, name: &str) -> Result<Instance> {
        let provider_name = provider_name_for(name);
        let provider = self.lookup_provider(&provider_name)?.ok_or_else(|| {
            Error::runtime(format!("Unknown provider: {provider_name} <- {name}"))
        })?;
        let get = provider.get_declaration().cloned().ok_or_else(|| {
            Error::runtime(format!(
                "Provider '{provider_name}' must define $get factory method"
            ))
        })?;

        self.enter(name)?;
        let built = self.invoke(&get, &Locals::new());
        self.leave(name)?;
        let instance = built?;

        trace!(service = name, "Service instantiated");
        self.instances
            .write()
            .map_err(|_| Error::poisoned("injector instances"))?
            .insert(name.to_string(), instance.clone());
        Ok(instance)
    }
}

impl Injector for GraphInjector {
    fn has_provider(&self, name: &str) -> bool {
        matches!(self.lookup_provider(name), Ok(Some(_)))
    }

    fn provider(&self, name: &str) -> Result<ProviderInstance> {
        self.lookup_provider(name)?
            .ok_or_else(|| Error::runtime(format!("Unknown provider: {name}")))
    }

    fn define_provider(&self, name: &str, provider: ProviderInstance) -> Result<()> {
        trace!(provider = name, "Provider defined");
        self.providers
            .write()
            .map_err(|_| Error::poisoned("injector providers"))?
            .insert(name.to_string(), provider);
        Ok(())
    }

    fn define_constant(&self, name: &str, value: Declaration) -> Result<()> {
        trace!(constant = name, "Constant defined");
        self.constants
            .write()
            .map_err(|_| Error::poisoned("injector constants"))?
            .insert(name.to_string(), value);
        Ok(())
    }

    fn has_constant(&self, name: &str) -> bool {
        matches!(self.lookup_constant(name), Ok(Some(_)))
    }

    fn decorate_capability(&self, name: &str, decorate: CapabilityDecorator<'_>) -> Result<()> {
        let provider = self.provider(name)?;
        let current = provider.capability().cloned().ok_or_else(|| {
            Error::runtime(format!("Provider '{name}' has no registration methods"))
        })?;
        let decorated = provider.with_capability(decorate(current));
        self.define_provider(name, decorated)
    }

    fn instantiate_provider(
        &self,
        declaration: &Declaration,
        locals: &Locals,
    ) -> Result<ProviderInstance> {
        match declaration {
            Declaration::Object(_) => ProviderInstance::from_object(declaration)
                .ok_or_else(|| Error::runtime("Provider must define $get factory method")),
            Declaration::Function(_) | Declaration::Annotated(_) => {
                let args = self.resolve_arguments(declaration, locals, |dependency| {
                    self.provider_dependency(dependency)
                })?;
                let constructor = declaration.as_function().ok_or_else(|| {
                    Error::internal("injectable declaration without a function")
                })?;
                constructor
                    .call(&Invocation::new(self, args))?
                    .into_provider()
            }
            Declaration::Value(_) => Err(Error::runtime(format!(
                "Provider must be a provider object or constructor, got {}",
                declaration.kind()
            ))),
        }
    }

    fn invoke(&self, declaration: &Declaration, locals: &Locals) -> Result<Instance> {
        let function = declaration.as_function().ok_or_else(|| {
            Error::runtime(format!(
                "Argument 'fn' is not a function, got {}",
                declaration.kind()
            ))
        })?;
        let args =
            self.resolve_arguments(declaration, locals, |dependency| self.service(dependency))?;
        function.call(&Invocation::new(self, args))
    }

    fn service(&self, name: &str) -> Result<Instance> {
        let cached = self
            .instances
            .read()
            .map_err(|_| Error::poisoned("injector instances"))?
            .get(name)
            .cloned();
        if let Some(instance) = cached {
            return Ok(instance);
        }
        if let Some(constant) = self.lookup_constant(name)? {
            return Ok(Instance::from(constant));
        }
        self.build_service(name)
    }
}

impl std::fmt::Debug for GraphInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphInjector")
            .field("providers", &self.provider_names().unwrap_or_default())
            .finish_non_exhaustive()
    }
}

