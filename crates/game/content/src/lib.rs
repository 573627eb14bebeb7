//! Data-driven Watcher content and loaders.
//!
//! This crate houses the card and enemy catalogs and provides loaders for
//! RON/TOML data files:
//! - Card catalog (`cards.ron`)
//! - Enemy catalog with move tables and AI (`enemies.ron`)
//! - Combat rules (`config.toml`)
//!
//! Content is consumed through the oracles of `spire-core` and never appears
//! in combat state. The built-in catalogs are embedded at compile time; see
//! [`ContentRegistry::builtin`].

pub mod registry;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use registry::ContentRegistry;

#[cfg(feature = "loaders")]
pub use loaders::{
    CardCatalog, CardLoader, ConfigLoader, ContentFactory, EnemyCatalog, EnemyLoader, LoadResult,
};
