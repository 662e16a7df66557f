use core::fmt::Display;
use core::str::FromStr;

use crate::Reflect;
use crate::registry::FromType;

// -----------------------------------------------------------------------------
// TypeTraitDefault

/// A parameterless constructor.
///
/// Generated by `#[reflect(default)]`; registered for primitives, `String`,
/// `Option<T>` and `Vec<T>`.
///
/// # Examples
///
/// ```
/// use pathbind_reflect::registry::{FromType, TypeTraitDefault};
///
/// let ctor = <TypeTraitDefault as FromType<String>>::from_type();
/// assert_eq!(ctor.default().take::<String>().unwrap(), "");
/// ```
#[derive(Clone)]
pub struct TypeTraitDefault {
    func: fn() -> Box<dyn Reflect>,
}

impl TypeTraitDefault {
    #[inline]
    pub fn default(&self) -> Box<dyn Reflect> {
        (self.func)()
    }
}

fn default_boxed<T: Default + Reflect>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

impl<T: Default + Reflect> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            func: default_boxed::<T>,
        }
    }
}

// -----------------------------------------------------------------------------
// TypeTraitFromStr

/// A constructor taking a single string.
///
/// Generated by `#[reflect(from_str)]` for types implementing [`FromStr`].
/// Parse failures are reported through the error's [`Display`] text.
#[derive(Clone)]
pub struct TypeTraitFromStr {
    func: fn(&str) -> Result<Box<dyn Reflect>, String>,
}

impl TypeTraitFromStr {
    #[inline]
    pub fn parse(&self, raw: &str) -> Result<Box<dyn Reflect>, String> {
        (self.func)(raw)
    }
}

impl<T> FromType<T> for TypeTraitFromStr
where
    T: FromStr + Reflect,
    T::Err: Display,
{
    fn from_type() -> Self {
        Self {
            func: parse_boxed::<T>,
        }
    }
}

fn parse_boxed<T>(raw: &str) -> Result<Box<dyn Reflect>, String>
where
    T: FromStr + Reflect,
    T::Err: Display,
{
    match raw.parse::<T>() {
        Ok(value) => Ok(Box::new(value)),
        Err(err) => Err(err.to_string()),
    }
}
