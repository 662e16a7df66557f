use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{ReflectMut, ReflectOwned, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// Object-safe, type-erased access to a value.
///
/// Implemented by `#[derive(Reflect)]` for named structs and unit enums, and
/// by this crate for primitives, `String`, `Option<T>`, `Vec<T>` and `[T; N]`.
///
/// Each value belongs to exactly one [`ReflectKind`]; [`reflect_ref`],
/// [`reflect_mut`] and [`reflect_owned`] expose the matching kind trait.
///
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
/// [`reflect_owned`]: Reflect::reflect_owned
pub trait Reflect: DynamicTypePath + DynamicTyped + Any + Send + Sync {
    fn as_reflect(&self) -> &dyn Reflect;

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>;

    /// Replaces `self` with `value`.
    ///
    /// Returns the value back if it is not of type `Self`.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn reflect_kind(&self) -> ReflectKind;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    fn reflect_owned(self: Box<Self>) -> ReflectOwned;

    /// Debug formatting through reflection.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reflect_ref() {
            ReflectRef::Struct(data) => {
                let mut debug = f.debug_struct(self.reflect_type_name());
                for index in 0..data.field_len() {
                    if let (Some(name), Some(value)) = (data.name_at(index), data.field_at(index)) {
                        debug.field(name, &value as &dyn fmt::Debug);
                    }
                }
                debug.finish()
            }
            ReflectRef::List(data) => f
                .debug_list()
                .entries((0..data.len()).filter_map(|index| data.get(index)))
                .finish(),
            ReflectRef::Nullable(data) => match data.get() {
                Some(inner) => f.debug_tuple("Some").field(&inner).finish(),
                None => f.write_str("None"),
            },
            ReflectRef::Enum(data) => f.write_str(data.variant_name()),
            ReflectRef::Opaque(_) => write!(f, "Opaque({})", self.reflect_type_path()),
        }
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

impl dyn Reflect {
    /// The [`TypeId`] of the underlying value.
    #[inline]
    pub fn ty_id(&self) -> TypeId {
        (self as &dyn Any).type_id()
    }

    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathbind_reflect::Reflect;
    ///
    /// let value: Box<dyn Reflect> = Box::new(5_u8);
    /// assert!(value.is::<u8>());
    /// assert!(!value.is::<u16>());
    /// ```
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }

    /// Downcasts the box to type `T`, returning it back on mismatch.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type id was checked before downcasting"),
        }
    }

    /// Downcasts and unboxes the value, returning it back on mismatch.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathbind_reflect::Reflect;
    ///
    /// let value: Box<dyn Reflect> = Box::new(String::from("x"));
    /// let value = value.take::<u8>().unwrap_err();
    /// assert_eq!(value.take::<String>().unwrap(), "x");
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}
