//! The intrinsic `$provide` capability
//!
//! Every `$provide` registration method reduces to defining a provider:
//!
//! | Method | Provider defined as `{name}Provider` |
//! |--------|--------------------------------------|
//! | `constant` | none; the value is stored as a constant |
//! | `value` | `$get` returning the value |
//! | `factory` | `$get` is the factory |
//! | `service` | `$get` invokes the constructor |
//! | `provider` | the instantiated provider |

use modscope_domain::constants::{
    METHOD_CONSTANT, METHOD_FACTORY, METHOD_PROVIDER, METHOD_SERVICE, METHOD_VALUE,
    PROVIDE_METHODS, provider_name_for,
};
use modscope_domain::error::{Error, Result};
use modscope_domain::ports::{Injector, RegistrationCapability};
use modscope_domain::value_objects::{
    Declaration, Function, Instance, Locals, ProviderInstance, RegistrationCall,
};
use tracing::trace;

/// Registration methods of `$provide`
#[derive(Debug, Default, Clone, Copy)]
pub struct ProvideCapability;

impl ProvideCapability {
    fn register(
        injector: &dyn Injector,
        method: &str,
        name: &str,
        declaration: Declaration,
    ) -> Result<()> {
        let provider = match method {
            METHOD_CONSTANT => return injector.define_constant(name, declaration),
            METHOD_VALUE => {
                let value = Instance::from(declaration);
                ProviderInstance::new(Function::returning(name, Vec::<String>::new(), value).into())
            }
            METHOD_FACTORY => ProviderInstance::new(declaration),
            METHOD_SERVICE => ProviderInstance::new(service_getter(name, declaration).into()),
            METHOD_PROVIDER => injector.instantiate_provider(&declaration, &Locals::new())?,
            other => {
                return Err(Error::runtime(format!(
                    "$provide has no registration method '{other}'"
                )));
            }
        };
        injector.define_provider(&provider_name_for(name), provider)
    }
}

/// `$get` of a service registration: invoke the constructor
fn service_getter(name: &str, constructor: Declaration) -> Function {
    Function::named(name, Vec::<String>::new(), move |invocation| {
        invocation.injector.invoke(&constructor, &Locals::new())
    })
}

impl RegistrationCapability for ProvideCapability {
    fn methods(&self) -> Vec<String> {
        PROVIDE_METHODS.iter().map(ToString::to_string).collect()
    }

    fn call(&self, injector: &dyn Injector, method: &str, call: RegistrationCall) -> Result<()> {
        for (name, declaration) in call.into_items() {
            trace!(method, name = %name, "$provide registration");
            Self::register(injector, method, &name, declaration)?;
        }
        Ok(())
    }
}
