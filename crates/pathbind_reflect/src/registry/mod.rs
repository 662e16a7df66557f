//! Type metadata and type traits.
//!
//! A [`TypeRegistry`] maps each registered type to a [`TypeMeta`]: its
//! [`TypeInfo`](crate::info::TypeInfo) plus capabilities that cannot be
//! expressed through [`Reflect`](crate::Reflect) alone, such as building a
//! default value ([`TypeTraitDefault`]) or parsing from a string
//! ([`TypeTraitFromStr`]).

// -----------------------------------------------------------------------------
// Modules

mod arc;
mod get_type_meta;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use arc::TypeRegistryArc;
pub use get_type_meta::GetTypeMeta;
pub use traits::{TypeTraitDefault, TypeTraitFromStr};
pub use type_meta::TypeMeta;
pub use type_registry::TypeRegistry;
pub use type_trait::{FromType, TypeTrait};
