use core::fmt::{self, Display};
use std::sync::Arc;

use pathbind_reflect::Reflect;
use pathbind_reflect::info::{Type, TypePath};

use crate::ConversionError;

type ParseFn = dyn Fn(&str) -> Result<Box<dyn Reflect>, ConversionError> + Send + Sync;

/// Parses a raw string into a value of exactly one type.
///
/// Cheap to clone; clones share the same function.
///
/// # Examples
///
/// ```
/// use pathbind_convert::Converter;
///
/// let hex = Converter::typed(|raw: &str| u32::from_str_radix(raw, 16));
/// assert!(hex.target().is::<u32>());
/// assert_eq!(hex.convert_to::<u32>("ff").unwrap(), 255);
/// assert!(hex.convert("zz").is_err());
/// ```
#[derive(Clone)]
pub struct Converter {
    target: Type,
    parse: Arc<ParseFn>,
}

impl Converter {
    /// A converter producing boxed values of `target`.
    ///
    /// The function must only produce values of `target`.
    pub fn new<F>(target: Type, parse: F) -> Self
    where
        F: Fn(&str) -> Result<Box<dyn Reflect>, ConversionError> + Send + Sync + 'static,
    {
        Self {
            target,
            parse: Arc::new(parse),
        }
    }

    /// A converter from a typed parse function.
    ///
    /// Errors become [`ConversionError::Malformed`] carrying their
    /// [`Display`] text.
    pub fn typed<T, E, F>(parse: F) -> Self
    where
        T: Reflect + TypePath,
        E: Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        Self::new(Type::of::<T>(), move |raw| match parse(raw) {
            Ok(value) => Ok(Box::new(value)),
            Err(err) => Err(ConversionError::malformed(T::type_path(), raw, err)),
        })
    }

    #[inline]
    pub const fn target(&self) -> &Type {
        &self.target
    }

    #[inline]
    pub fn convert(&self, raw: &str) -> Result<Box<dyn Reflect>, ConversionError> {
        (self.parse)(raw)
    }

    /// Converts and unboxes the result.
    pub fn convert_to<T: Reflect + TypePath>(&self, raw: &str) -> Result<T, ConversionError> {
        self.convert(raw)?
            .take::<T>()
            .map_err(|value| ConversionError::TargetMismatch {
                expected: T::type_path(),
                found: value.reflect_type_path(),
            })
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
