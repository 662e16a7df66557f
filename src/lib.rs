//! Typed paths and data binding over reflected values.
//!
//! - [`reflect`]: runtime type shapes and `#[derive(Reflect)]`.
//! - [`access`]: accessors built once from a path and evaluated many times.
//! - [`convert`]: the string-to-value conversion registry.
//! - [`bind`]: binders assigning struct members from a flat data source.
//! - [`utils`]: hashing and type-keyed maps shared by the crates above.
//!
//! # Examples
//!
//! ```
//! use pathbind::access::Accessor;
//! use pathbind::bind::{Binder, MapSource};
//! use pathbind::convert::Conversions;
//! use pathbind::Reflect;
//!
//! #[derive(Reflect, Default)]
//! #[reflect(default)]
//! struct Account {
//!     owner: String,
//!     limits: Vec<u32>,
//! }
//!
//! let source = MapSource::from_iter([("owner", "Ada"), ("limits", "10, 20, 30")]);
//! let account = Binder::<Account>::new(&Conversions::new())
//!     .unwrap()
//!     .build(&source)
//!     .unwrap();
//!
//! let second = Accessor::parse::<Account>(".limits[1]").unwrap();
//! assert_eq!(second.get_value(&account).unwrap().downcast_ref::<u32>(), Some(&20));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use pathbind_access as access;
pub use pathbind_bind as bind;
pub use pathbind_convert as convert;
pub use pathbind_reflect as reflect;
pub use pathbind_utils as utils;

#[cfg(feature = "derive")]
pub use pathbind_reflect::derive::Reflect;
