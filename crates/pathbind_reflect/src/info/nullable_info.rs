use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed};

/// Shape of `Option<T>`.
#[derive(Debug)]
pub struct NullableInfo {
    ty: Type,
    inner: Type,
    inner_info: fn() -> &'static TypeInfo,
    none: fn() -> Box<dyn Reflect>,
    some: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
}

impl NullableInfo {
    #[inline]
    pub fn new<N: TypePath, T: Typed>(
        none: fn() -> Box<dyn Reflect>,
        some: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
    ) -> Self {
        Self {
            ty: Type::of::<N>(),
            inner: Type::of::<T>(),
            inner_info: T::type_info,
            none,
            some,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn inner(&self) -> &Type {
        &self.inner
    }

    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }

    /// Builds the absent value.
    #[inline]
    pub fn none(&self) -> Box<dyn Reflect> {
        (self.none)()
    }

    /// Wraps an inner value, handing it back if it has the wrong type.
    #[inline]
    pub fn some(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.some)(value)
    }
}
