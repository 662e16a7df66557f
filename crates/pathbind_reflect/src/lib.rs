//! Runtime type shapes and dynamic values.
//!
//! - [`info`]: static descriptions of a type's shape ([`TypeInfo`](info::TypeInfo)).
//! - [`Reflect`]: object-safe access to a value of any reflected type.
//! - [`ops`]: per-kind traits such as [`Struct`](ops::Struct) and [`List`](ops::List).
//! - [`registry`]: type metadata and type traits keyed by [`TypeId`](core::any::TypeId).
//!
//! # Examples
//!
//! ```
//! use pathbind_reflect::{Reflect, derive::Reflect};
//! use pathbind_reflect::ops::ReflectRef;
//!
//! #[derive(Reflect)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let p = Point { x: 1, y: 2 };
//! let ReflectRef::Struct(s) = p.reflect_ref() else { unreachable!() };
//! assert_eq!(s.field("y").unwrap().downcast_ref::<i32>(), Some(&2));
//! ```

extern crate self as pathbind_reflect;

// -----------------------------------------------------------------------------
// Modules

pub mod info;
pub mod ops;
pub mod registry;

mod impls;
mod reflect;

#[cfg(feature = "derive")]
pub mod derive {
    //! Re-export of `#[derive(Reflect)]`.
    pub use pathbind_reflect_derive::Reflect;
}

// -----------------------------------------------------------------------------
// Exports

pub use reflect::Reflect;
