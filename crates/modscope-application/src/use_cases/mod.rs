//! Use Cases
//!
//! | Use case | Description |
//! |----------|-------------|
//! | [`ModuleIntrospector`] | Builds an intercepted module graph and answers declaration queries |
//! | [`InterceptingCapability`] | Records registrations passing through a provider |
//! | [`RegistrationLog`] | Captured registrations, tagged built-in or user-defined |

pub mod interception;
pub mod introspector;
pub mod registration_log;

pub use interception::InterceptingCapability;
pub use introspector::{IntrospectionOptions, ModuleIntrospector, ModuleSpec};
pub use registration_log::RegistrationLog;
