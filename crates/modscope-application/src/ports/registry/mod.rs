//! Registration Provider Registry
//!
//! Compile-time registration of the providers whose registration methods are
//! intercepted, via the `linkme` crate.
//!
//! ## Usage
//!
//! ### Registering a provider
//!
//! ```ignore
//! use modscope_application::ports::registry::{ProviderMetadataEntry, PROVIDER_METADATA};
//!
//! #[linkme::distributed_slice(PROVIDER_METADATA)]
//! static ROUTE_PROVIDER: ProviderMetadataEntry = ProviderMetadataEntry {
//!     provider_name: "$routeProvider",
//!     registration_methods: &["when"],
//!     overrides: true,
//! };
//! ```
//!
//! ### Looking one up
//!
//! ```ignore
//! let table = ProviderMetadataTable::built_in();
//! assert!(!table.overrides("$compileProvider"));
//! ```

pub mod provider_metadata;

pub use provider_metadata::{
    PROVIDER_METADATA, ProviderMetadataEntry, ProviderMetadataTable, list_provider_metadata,
    resolve_provider_metadata,
};
