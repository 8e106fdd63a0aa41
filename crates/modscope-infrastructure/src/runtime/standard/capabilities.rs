//! Registration capabilities of the standard providers
//!
//! Filters and animations are stored as `$provide` factories under a
//! suffixed name, using the `$provide` handed to the provider constructor.
//! Controllers and directives are kept by the capability itself; the first
//! directive of a name also defines a `{name}Directive` factory.

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use modscope_domain::constants::{
    CONTROLLER_MEMBER, DIRECTIVE_SUFFIX, FILTER_SUFFIX, METHOD_COMPONENT, METHOD_DIRECTIVE,
    METHOD_FACTORY, METHOD_REGISTER,
};
use modscope_domain::error::{Error, Result};
use modscope_domain::ports::{Injector, RegistrationCapability};
use modscope_domain::value_objects::{
    Declaration, Function, Instance, Locals, ProviderInstance, RegistrationCall,
};
use serde_json::Value;

/// Suffix of animation factories registered on `$provide`
pub const ANIMATION_SUFFIX: &str = "-animation";

fn unsupported(provider: &str, method: &str) -> Error {
    Error::runtime(format!("{provider} has no registration method '{method}'"))
}

/// `$filterProvider.register`
#[derive(Debug, Clone)]
pub struct FilterCapability {
    provide: ProviderInstance,
}

impl FilterCapability {
    /// Create a capability registering through `provide`
    pub fn new(provide: ProviderInstance) -> Self {
        Self { provide }
    }
}

impl RegistrationCapability for FilterCapability {
    fn methods(&self) -> Vec<String> {
        vec![METHOD_REGISTER.to_string()]
    }

    fn call(&self, injector: &dyn Injector, method: &str, call: RegistrationCall) -> Result<()> {
        if method != METHOD_REGISTER {
            return Err(unsupported("$filterProvider", method));
        }
        for (name, factory) in call.into_items() {
            self.provide.call(
                injector,
                METHOD_FACTORY,
                RegistrationCall::named(format!("{name}{FILTER_SUFFIX}"), factory),
            )?;
        }
        Ok(())
    }
}

/// `$animateProvider.register`
#[derive(Debug, Clone)]
pub struct AnimateCapability {
    provide: ProviderInstance,
}

impl AnimateCapability {
    /// Create a capability registering through `provide`
    pub fn new(provide: ProviderInstance) -> Self {
        Self { provide }
    }
}

impl RegistrationCapability for AnimateCapability {
    fn methods(&self) -> Vec<String> {
        vec![METHOD_REGISTER.to_string()]
    }

    fn call(&self, injector: &dyn Injector, method: &str, call: RegistrationCall) -> Result<()> {
        if method != METHOD_REGISTER {
            return Err(unsupported("$animateProvider", method));
        }
        for (name, factory) in call.into_items() {
            self.provide.call(
                injector,
                METHOD_FACTORY,
                RegistrationCall::named(format!("{name}{ANIMATION_SUFFIX}"), factory),
            )?;
        }
        Ok(())
    }
}

/// `$controllerProvider.register`
#[derive(Debug, Default)]
pub struct ControllerCapability {
    controllers: RwLock<IndexMap<String, Declaration>>,
}

impl ControllerCapability {
    /// Create an empty controller table
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered controller constructor
    pub fn controller(&self, name: &str) -> Result<Option<Declaration>> {
        Ok(self
            .controllers
            .read()
            .map_err(|_| Error::poisoned("controller table"))?
            .get(name)
            .cloned())
    }
}

impl RegistrationCapability for ControllerCapability {
    fn methods(&self) -> Vec<String> {
        vec![METHOD_REGISTER.to_string()]
    }

    fn call(&self, _injector: &dyn Injector, method: &str, call: RegistrationCall) -> Result<()> {
        if method != METHOD_REGISTER {
            return Err(unsupported("$controllerProvider", method));
        }
        let mut controllers = self
            .controllers
            .write()
            .map_err(|_| Error::poisoned("controller table"))?;
        controllers.extend(call.into_items());
        Ok(())
    }
}

type DirectiveTable = Arc<RwLock<IndexMap<String, Vec<Declaration>>>>;

/// `$compileProvider.directive` and `$compileProvider.component`
#[derive(Debug)]
pub struct CompileCapability {
    provide: ProviderInstance,
    directives: DirectiveTable,
}

impl CompileCapability {
    /// Create a capability registering directive factories through `provide`
    pub fn new(provide: ProviderInstance) -> Self {
        Self {
            provide,
            directives: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Directive factories registered under `name`, in registration order
    pub fn directive_factories(&self, name: &str) -> Result<Vec<Declaration>> {
        Ok(self
            .directives
            .read()
            .map_err(|_| Error::poisoned("directive table"))?
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    fn add_directive(
        &self,
        injector: &dyn Injector,
        name: String,
        factory: Declaration,
    ) -> Result<()> {
        let first = {
            let mut directives = self
                .directives
                .write()
                .map_err(|_| Error::poisoned("directive table"))?;
            let factories = directives.entry(name.clone()).or_default();
            factories.push(factory);
            factories.len() == 1
        };
        if first {
            self.provide.call(
                injector,
                METHOD_FACTORY,
                RegistrationCall::named(
                    format!("{name}{DIRECTIVE_SUFFIX}"),
                    directive_list_factory(name, Arc::clone(&self.directives)),
                ),
            )?;
        }
        Ok(())
    }
}

/// `{name}Directive` service: the definition object of every factory of `name`, keyed by position
fn directive_list_factory(name: String, directives: DirectiveTable) -> Function {
    Function::named(
        format!("{name}{DIRECTIVE_SUFFIX}"),
        Vec::<String>::new(),
        move |invocation| {
            let factories = directives
                .read()
                .map_err(|_| Error::poisoned("directive table"))?
                .get(&name)
                .cloned()
                .unwrap_or_default();
            let mut definitions = IndexMap::new();
            for (index, factory) in factories.iter().enumerate() {
                let definition = match invocation.injector.invoke(factory, &Locals::new())? {
                    Instance::Declaration(declaration) => declaration,
                    Instance::Value(value) => Declaration::Value(value),
                    Instance::Provider(_) => {
                        return Err(Error::runtime(format!(
                            "Directive '{name}' factory returned a provider"
                        )));
                    }
                };
                definitions.insert(index.to_string(), definition);
            }
            Ok(Instance::Declaration(Declaration::Object(definitions)))
        },
    )
}

/// Directive factory generated for a component options object
fn component_factory(name: &str, options: Declaration) -> Function {
    Function::named(name, Vec::<String>::new(), move |_| {
        let controller = options.member(CONTROLLER_MEMBER).cloned().unwrap_or_else(|| {
            Function::returning("noop", Vec::<String>::new(), Instance::value(Value::Null)).into()
        });
        let mut definition = IndexMap::new();
        definition.insert(CONTROLLER_MEMBER.to_string(), controller);
        definition.insert("restrict".to_string(), Declaration::value("E"));
        if let Declaration::Object(members) = &options {
            for (key, member) in members {
                definition
                    .entry(key.clone())
                    .or_insert_with(|| member.clone());
            }
        }
        Ok(Instance::Declaration(Declaration::Object(definition)))
    })
}

impl RegistrationCapability for CompileCapability {
    fn methods(&self) -> Vec<String> {
        vec![METHOD_DIRECTIVE.to_string(), METHOD_COMPONENT.to_string()]
    }

    fn call(&self, injector: &dyn Injector, method: &str, call: RegistrationCall) -> Result<()> {
        match method {
            METHOD_DIRECTIVE => {
                for (name, factory) in call.into_items() {
                    self.add_directive(injector, name, factory)?;
                }
                Ok(())
            }
            METHOD_COMPONENT => {
                for (name, options) in call.into_items() {
                    let factory = component_factory(&name, options);
                    self.add_directive(injector, name, factory.into())?;
                }
                Ok(())
            }
            other => Err(unsupported("$compileProvider", other)),
        }
    }
}
