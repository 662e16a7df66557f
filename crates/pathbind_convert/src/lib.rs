//! String-to-value conversion keyed by destination type.
//!
//! [`Conversions`] maps a type to a [`Converter`], a function parsing a raw
//! string into a boxed value of that type. Types without an explicit
//! converter are resolved through a fixed chain of [providers](ConversionProvider)
//! and the result is cached per type.
//!
//! # Examples
//!
//! ```
//! use pathbind_convert::Conversions;
//!
//! let conversions = Conversions::new();
//!
//! assert_eq!(conversions.convert_to::<i32>(" 42 ").unwrap(), 42);
//! assert_eq!(conversions.convert_to::<Option<u8>>("NULL").unwrap(), None);
//! assert_eq!(conversions.convert_to::<Vec<bool>>("true, False").unwrap(), vec![true, false]);
//! assert_eq!(conversions.convert_to::<String>("EMPTY").unwrap(), "");
//! assert!(conversions.convert_to::<u8>("300").is_err());
//! ```

// -----------------------------------------------------------------------------
// Modules

mod builtin;
mod converter;
mod error;
mod providers;
mod registry;

// -----------------------------------------------------------------------------
// Exports

pub use builtin::{EMPTY_LITERAL, NULL_LITERAL};
pub use converter::Converter;
pub use error::ConversionError;
pub use providers::{
    ConversionProvider, EnumProvider, FromStrProvider, NullableProvider, SequenceProvider,
};
pub use registry::Conversions;
