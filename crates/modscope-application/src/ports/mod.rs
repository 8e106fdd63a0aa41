//! Application Ports
//!
//! - **registry/** - provider registration metadata, registered at compile time

pub mod registry;

pub use registry::{ProviderMetadataEntry, ProviderMetadataTable};
