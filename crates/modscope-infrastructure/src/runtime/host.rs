//! In-memory host runtime
//!
//! Builds an injector graph by processing steps in order. Loading a module
//! loads its requires first (each module once per graph), then drains its
//! registration queue against the provider phase, then runs its config
//! blocks.

use std::collections::HashSet;
use std::sync::Arc;

use modscope_domain::constants::PROVIDE;
use modscope_domain::error::Result;
use modscope_domain::ports::{GraphStep, HostRuntime, Injector, ModuleRegistry};
use modscope_domain::value_objects::ProviderInstance;
use tracing::{debug, info};

use super::injector::GraphInjector;
use super::provide::ProvideCapability;

/// Host runtime over a module registry
#[derive(Clone)]
pub struct InMemoryHostRuntime {
    registry: Arc<dyn ModuleRegistry>,
}

impl InMemoryHostRuntime {
    /// Create a runtime resolving module names through `registry`
    pub fn new(registry: Arc<dyn ModuleRegistry>) -> Self {
        Self { registry }
    }

    /// The registry modules are resolved from
    pub fn registry(&self) -> &Arc<dyn ModuleRegistry> {
        &self.registry
    }

    fn load_module(
        &self,
        injector: &dyn Injector,
        name: &str,
        loaded: &mut HashSet<String>,
    ) -> Result<()> {
        if !loaded.insert(name.to_string()) {
            return Ok(());
        }
        let module = self.registry.require_module(name)?;

        for required in module.requires() {
            self.load_module(injector, required, loaded)?;
        }

        let entries = module.drain_order();
        debug!(module = name, entries = entries.len(), "Draining registration queue");
        for entry in entries {
            let call = entry.call()?;
            injector
                .provider(&entry.provider_name)?
                .call(injector, &entry.method, call)?;
        }

        for block in module.config_blocks() {
            block.configure(injector)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryHostRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryHostRuntime")
            .field("modules", &self.registry.module_names())
            .finish()
    }
}

impl HostRuntime for InMemoryHostRuntime {
    fn build_graph(&self, steps: Vec<GraphStep>) -> Result<Arc<dyn Injector>> {
        let injector = Arc::new(GraphInjector::new());
        injector.define_provider(
            PROVIDE,
            ProviderInstance::intrinsic(Arc::new(ProvideCapability)),
        )?;

        let mut loaded = HashSet::new();
        for step in &steps {
            match step {
                GraphStep::Module(name) => {
                    self.load_module(injector.as_ref(), name, &mut loaded)?;
                }
                GraphStep::Config(config) => config.configure(injector.as_ref())?,
            }
        }

        info!(
            steps = steps.len(),
            modules = loaded.len(),
            "Injector graph built"
        );
        Ok(injector)
    }
}
