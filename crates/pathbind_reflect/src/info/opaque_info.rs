use crate::info::{Type, TypePath};

/// A type with no reflected structure.
#[derive(Debug)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    #[inline]
    pub fn new<T: TypePath>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }
}
