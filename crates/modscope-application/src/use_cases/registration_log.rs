//! Registration log
//!
//! Records every intercepted registration while an injector graph is built.
//! Writes happen only during graph construction; afterwards the log is read.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;
use modscope_domain::constants::{PROVIDE, provider_name_for};
use modscope_domain::error::{Error, Result};
use modscope_domain::value_objects::{ComponentDeclaration, Declaration, ProviderDeclaration};
use tracing::debug;

use crate::domain_services::Resolution;
use crate::ports::registry::ProviderMetadataTable;

#[derive(Debug, Default)]
struct LogState {
    /// provider name -> component name -> kept declarations
    components: IndexMap<String, IndexMap<String, Resolution>>,
    /// `XxxProvider` -> provider declaration
    providers: IndexMap<String, ProviderDeclaration>,
}

/// Live record of intercepted registrations
#[derive(Debug)]
pub struct RegistrationLog {
    state: RwLock<LogState>,
    built_in_phase: AtomicBool,
    metadata: ProviderMetadataTable,
}

impl RegistrationLog {
    /// Empty log, starting in the built-in phase
    pub fn new(metadata: ProviderMetadataTable) -> Self {
        Self {
            state: RwLock::new(LogState::default()),
            built_in_phase: AtomicBool::new(true),
            metadata,
        }
    }

    /// Provider metadata deciding what is recorded and how names combine
    pub fn metadata(&self) -> &ProviderMetadataTable {
        &self.metadata
    }

    /// Whether registrations are currently tagged as built-in
    pub fn is_built_in_phase(&self) -> bool {
        self.built_in_phase.load(Ordering::SeqCst)
    }

    /// Switch built-in tagging on or off
    pub fn set_built_in_phase(&self, built_in: bool) {
        self.built_in_phase.store(built_in, Ordering::SeqCst);
    }

    /// Record a component registration; returns whether it took effect
    ///
    /// Provider declarations are left alone: once captured they stay until a
    /// later `provider` registration of the same name replaces them.
    pub fn record_component(
        &self,
        provider_name: &str,
        method: &str,
        component_name: &str,
        raw_declaration: Declaration,
    ) -> Result<bool> {
        let built_in = self.is_built_in_phase();
        let candidate =
            ComponentDeclaration::new(method, component_name, raw_declaration, built_in);
        let overrides = self.metadata.overrides(provider_name);

        let mut state = self.state.write().map_err(|_| Error::poisoned("registration log"))?;
        let kept = state
            .components
            .entry(provider_name.to_string())
            .or_default()
            .entry(component_name.to_string())
            .or_default()
            .offer(candidate, overrides);

        debug!(
            provider = provider_name,
            method,
            component = component_name,
            built_in,
            kept,
            "Recorded registration"
        );
        Ok(kept)
    }

    /// Record the declaration passed to `$provide.provider(name, ..)`
    pub fn record_provider(&self, service_name: &str, raw_declaration: Declaration) -> Result<()> {
        let declaration = ProviderDeclaration::new(raw_declaration, self.is_built_in_phase());
        let mut state = self.state.write().map_err(|_| Error::poisoned("registration log"))?;
        state
            .providers
            .insert(provider_name_for(service_name), declaration);
        Ok(())
    }

    /// Whether the effective `$provide` registration of `name` is a constant
    pub fn has_constant(&self, name: &str) -> Result<bool> {
        let state = self.state.read().map_err(|_| Error::poisoned("registration log"))?;
        Ok(state
            .components
            .get(PROVIDE)
            .and_then(|components| components.get(name))
            .is_some_and(Resolution::is_constant))
    }

    /// Kept declarations of `(provider_name, component_name)`
    pub fn components(
        &self,
        provider_name: &str,
        component_name: &str,
    ) -> Result<Option<Vec<ComponentDeclaration>>> {
        let state = self.state.read().map_err(|_| Error::poisoned("registration log"))?;
        Ok(state
            .components
            .get(provider_name)
            .and_then(|components| components.get(component_name))
            .filter(|resolution| !resolution.is_empty())
            .map(|resolution| resolution.declarations().to_vec()))
    }

    /// Names registered on `provider_name`, in first-registration order
    pub fn component_names(&self, provider_name: &str) -> Result<Vec<String>> {
        let state = self.state.read().map_err(|_| Error::poisoned("registration log"))?;
        Ok(state
            .components
            .get(provider_name)
            .map(|components| components.keys().cloned().collect())
            .unwrap_or_default())
    }

    /// Declaration of provider `provider_name` (`XxxProvider`)
    pub fn provider_declaration(&self, provider_name: &str) -> Result<Option<ProviderDeclaration>> {
        let state = self.state.read().map_err(|_| Error::poisoned("registration log"))?;
        Ok(state.providers.get(provider_name).cloned())
    }

    /// Names of providers registered by the standard library
    pub fn built_in_provider_names(&self) -> Result<Vec<String>> {
        let state = self.state.read().map_err(|_| Error::poisoned("registration log"))?;
        Ok(state
            .providers
            .iter()
            .filter(|(_, declaration)| declaration.built_in)
            .map(|(name, _)| name.clone())
            .collect())
    }
}
