//! Domain Entities
//!
//! Objects with identity. Modules are identified by name and created once
//! per registry.

/// Module graph vertex
pub mod module_node;

pub use module_node::ModuleNode;
