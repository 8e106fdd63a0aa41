//! # Infrastructure Layer
//!
//! Technical concerns supporting the application and domain layers.
//!
//! ## Module Categories
//!
//! ### Host Runtime
//! | Module | Description |
//! |--------|-------------|
//! | [`runtime`] | Module registry, injector, graph construction, standard library |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered TOML and environment configuration |
//! | [`constants`] | Infrastructure constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod runtime;

pub use error_ext::ErrorContext;
pub use runtime::{GraphInjector, InMemoryHostRuntime, InMemoryModuleRegistry};
