//! Application Layer - modscope
//!
//! Declaration resolution and module introspection over the host runtime
//! ports defined in `modscope-domain`.
//!
//! ## Architecture
//!
//! The application layer:
//! - Resolves winning declarations statically from module registration queues
//! - Intercepts registration capabilities while a module graph is built
//! - Exposes typed accessors over the captured registration log
//! - Has no dependency on the concrete host runtime
//!
//! ## Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`domain_services::DeclarationResolver`] | Static, side-effect free resolution over the module graph |
//! | [`domain_services::Resolution`] | Override-precedence accumulator shared by both designs |
//! | [`use_cases::ModuleIntrospector`] | Live interception log and accessors |
//! | [`ports::registry`] | Provider registration metadata table (`linkme`) |

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use ports::*;
pub use use_cases::*;
