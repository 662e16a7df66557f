use crate::info::{TypeInfo, TypePath};

/// A type with a static [`TypeInfo`].
///
/// # Examples
///
/// ```
/// use pathbind_reflect::info::{ReflectKind, Typed};
///
/// assert_eq!(<Vec<u8>>::type_info().kind(), ReflectKind::List);
/// assert_eq!(<Option<u8>>::type_info().kind(), ReflectKind::Nullable);
/// ```
pub trait Typed: TypePath {
    fn type_info() -> &'static TypeInfo;
}

/// Object-safe access to [`Typed`].
pub trait DynamicTyped {
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}
