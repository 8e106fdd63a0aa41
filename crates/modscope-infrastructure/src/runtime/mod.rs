//! In-memory host runtime
//!
//! Implements the domain runtime ports: a module registry, a two-phase
//! injector and graph construction, plus the standard library modules.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | `DashMap`-backed module namespace |
//! | [`injector`] | Provider and instance phases |
//! | [`provide`] | The intrinsic `$provide` capability |
//! | [`host`] | Graph construction from modules and config steps |
//! | [`standard`] | `ng` and `ngMock` |

pub mod host;
pub mod injector;
pub mod provide;
pub mod registry;
pub mod standard;

pub use host::InMemoryHostRuntime;
pub use injector::GraphInjector;
pub use provide::ProvideCapability;
pub use registry::InMemoryModuleRegistry;
