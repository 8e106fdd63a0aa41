//! Domain Services
//!
//! Declaration resolution shared by the static resolver and the live
//! introspector.
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`Resolution`] | Keeps what the host runtime keeps when a name is registered again |
//! | [`DeclarationResolver`] | Walks module queues without building an injector |

/// Override resolution
pub mod resolution;
/// Static declaration resolver
pub mod resolver;

pub use resolution::Resolution;
pub use resolver::DeclarationResolver;
