//! Small shared containers used across the `pathbind` crates.
//!
//! - [`hash`]: fixed-seed hashing and `hashbrown` aliases.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
//! - [`SyncTypeIdMap`]: a lock-guarded [`TypeIdMap`] for process-wide caches.

// -----------------------------------------------------------------------------
// Modules

pub mod hash;

mod sync_map;
mod typeid_map;

// -----------------------------------------------------------------------------
// Exports

pub use sync_map::SyncTypeIdMap;
pub use typeid_map::TypeIdMap;
