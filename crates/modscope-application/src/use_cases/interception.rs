//! Registration interception
//!
//! [`InterceptingCapability`] decorates a provider's registration capability:
//! it delegates to the wrapped capability, then records each registered item
//! in the [`RegistrationLog`]. Decorating `$provide` before any module loads
//! is enough to reach every other registration provider, because `provider`
//! registrations decorate the capability of the provider they produce.

use std::sync::Arc;

use modscope_domain::constants::{
    FILTER_PROVIDER, FILTER_SERVICE, FILTER_SUFFIX, METHOD_FACTORY, METHOD_PROVIDER,
    METHOD_REGISTER, PROVIDE, provider_name_for,
};
use modscope_domain::error::{Error, Result};
use modscope_domain::ports::{Injector, RegistrationCapability};
use modscope_domain::value_objects::{
    Declaration, Instance, Locals, ProviderInstance, RegistrationCall,
};
use tracing::debug;

use super::registration_log::RegistrationLog;

/// Registration capability that records what passes through it
pub struct InterceptingCapability {
    provider_name: String,
    inner: Arc<dyn RegistrationCapability>,
    log: Arc<RegistrationLog>,
}

impl InterceptingCapability {
    /// Wrap `inner`, the capability of provider `provider_name`
    pub fn new(
        provider_name: impl Into<String>,
        inner: Arc<dyn RegistrationCapability>,
        log: Arc<RegistrationLog>,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            inner,
            log,
        }
    }

    /// Decorate the capability of `provider_name` on `injector`
    pub fn install(
        injector: &dyn Injector,
        provider_name: &str,
        log: &Arc<RegistrationLog>,
    ) -> Result<()> {
        debug!(provider = provider_name, "Intercepting registration methods");
        injector.decorate_capability(
            provider_name,
            &|inner: Arc<dyn RegistrationCapability>| -> Arc<dyn RegistrationCapability> {
                Arc::new(Self::new(provider_name, inner, Arc::clone(log)))
            },
        )
    }

    /// Record what a `$provide.provider` registration produced
    fn capture_provider(
        &self,
        injector: &dyn Injector,
        service_name: &str,
        raw_declaration: Declaration,
    ) -> Result<()> {
        // The runtime keeps the constant, so the registration has no visible effect
        if self.log.has_constant(service_name)? {
            debug!(service = service_name, "Provider shadowed by a constant");
            return Ok(());
        }
        self.log
            .record_provider(service_name, raw_declaration.clone())?;

        let provider_name = provider_name_for(service_name);
        let instance = injector.provider(&provider_name)?;
        if let Some(get) = instance.get_declaration() {
            self.log
                .record_component(PROVIDE, METHOD_PROVIDER, service_name, get.clone())?;
        }

        if service_name == FILTER_SERVICE {
            capture_filter_factories(injector, &raw_declaration, &self.log)?;
        }

        if self.log.metadata().get(&provider_name).is_some() && instance.capability().is_some() {
            Self::install(injector, &provider_name, &self.log)?;
        }
        Ok(())
    }
}

impl RegistrationCapability for InterceptingCapability {
    fn methods(&self) -> Vec<String> {
        self.inner.methods()
    }

    fn call(&self, injector: &dyn Injector, method: &str, call: RegistrationCall) -> Result<()> {
        let items = call.clone().into_items();
        self.inner.call(injector, method, call)?;

        if !self.log.metadata().accepts(&self.provider_name, method) {
            return Ok(());
        }
        for (name, declaration) in items {
            if self.provider_name == PROVIDE && method == METHOD_PROVIDER {
                self.capture_provider(injector, &name, declaration)?;
            } else {
                self.log
                    .record_component(&self.provider_name, method, &name, declaration)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for InterceptingCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptingCapability")
            .field("provider_name", &self.provider_name)
            .field("methods", &self.inner.methods())
            .finish()
    }
}

/// Re-run the `$filter` provider constructor against a capturing `$provide`
///
/// The filter provider registers its filters as `{name}Filter` factories on
/// the `$provide` it was given. Handing it a `$provide` that only records
/// recovers the bare filter names. Provider objects register nothing.
fn capture_filter_factories(
    injector: &dyn Injector,
    raw_declaration: &Declaration,
    log: &Arc<RegistrationLog>,
) -> Result<()> {
    if !raw_declaration.is_injectable() {
        return Ok(());
    }
    let capture = FilterFactoryCapture {
        log: Arc::clone(log),
    };
    let mut locals = Locals::new();
    locals.insert(
        PROVIDE.to_string(),
        Instance::Provider(ProviderInstance::intrinsic(Arc::new(capture))),
    );
    injector.instantiate_provider(raw_declaration, &locals)?;
    Ok(())
}

/// A `$provide` stand-in recording `factory("{name}Filter", ..)` as filter registrations
struct FilterFactoryCapture {
    log: Arc<RegistrationLog>,
}

impl RegistrationCapability for FilterFactoryCapture {
    fn methods(&self) -> Vec<String> {
        vec![METHOD_FACTORY.to_string()]
    }

    fn call(&self, _injector: &dyn Injector, method: &str, call: RegistrationCall) -> Result<()> {
        if method != METHOD_FACTORY {
            return Err(Error::runtime(format!(
                "Provider has no registration method '{method}'"
            )));
        }
        for (name, declaration) in call.into_items() {
            let filter_name = name.strip_suffix(FILTER_SUFFIX).ok_or_else(|| {
                Error::malformed_registration(format!("Unexpected registered factory: {name}"))
            })?;
            self.log
                .record_component(FILTER_PROVIDER, METHOD_REGISTER, filter_name, declaration)?;
        }
        Ok(())
    }
}
