//! Binding flat string data onto reflected structs.
//!
//! A [`DataSource`] supplies raw strings by key; [`MapSource`] is the
//! reference implementation. A [`Binder`] is compiled once per destination
//! type and assigns every bindable member from a source, converting raw
//! values through a [`Conversions`](pathbind_convert::Conversions) registry.
//!
//! Failures are per member: one malformed value never stops the rest of the
//! bind, and a missing key is not a failure at all.
//!
//! # Examples
//!
//! ```
//! use pathbind_bind::{Binder, MapSource};
//! use pathbind_convert::Conversions;
//! use pathbind_reflect::derive::Reflect;
//!
//! #[derive(Reflect, Default)]
//! #[reflect(default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     tls: Option<Tls>,
//! }
//!
//! #[derive(Reflect, Default)]
//! #[reflect(default)]
//! struct Tls {
//!     cert: String,
//! }
//!
//! let source = MapSource::from_iter([
//!     ("host", "localhost"),
//!     ("port", "8080"),
//!     ("tls.cert", "server.pem"),
//! ]);
//!
//! let server = Binder::<Server>::new(&Conversions::new())
//!     .unwrap()
//!     .build(&source)
//!     .unwrap();
//!
//! assert_eq!(server.host, "localhost");
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.tls.unwrap().cert, "server.pem");
//! ```

// -----------------------------------------------------------------------------
// Modules

mod binder;
mod cache;
mod descriptor;
mod error;
mod map_source;
mod options;
mod plan;
mod source;

// -----------------------------------------------------------------------------
// Exports

pub use binder::Binder;
pub use cache::BinderCache;
pub use descriptor::{MemberDescriptor, MemberKind};
pub use error::{BindError, ConstructionError};
pub use map_source::MapSource;
pub use options::BinderOptions;
pub use source::{DEFAULT_SEPARATOR, DataSource, Keys, PrefixedSource};
