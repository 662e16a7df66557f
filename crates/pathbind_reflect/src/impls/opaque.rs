use core::fmt;

use crate::Reflect;
use crate::info::{NonGenericTypeInfoCell, OpaqueInfo, ReflectKind, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectMut, ReflectOwned, ReflectRef};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};

macro_rules! impl_reflect_opaque {
    ($($ty:ty => $path:literal, $name:literal;)*) => {$(
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl Reflect for $ty {
            #[inline]
            fn as_reflect(&self) -> &dyn Reflect {
                self
            }

            #[inline]
            fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
                self
            }

            #[inline]
            fn into_reflect(self: Box<Self>) -> Box<dyn Reflect> {
                self
            }

            #[inline]
            fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> ReflectKind {
                ReflectKind::Opaque
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Opaque(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Opaque(self)
            }

            #[inline]
            fn reflect_owned(self: Box<Self>) -> ReflectOwned {
                ReflectOwned::Opaque(self)
            }

            #[inline]
            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }

        impl GetTypeMeta for $ty {
            fn get_type_meta() -> TypeMeta {
                TypeMeta::of::<Self>().with_trait(<TypeTraitDefault as FromType<Self>>::from_type())
            }
        }
    )*};
}

impl_reflect_opaque! {
    bool => "bool", "bool";
    char => "char", "char";
    u8 => "u8", "u8";
    u16 => "u16", "u16";
    u32 => "u32", "u32";
    u64 => "u64", "u64";
    u128 => "u128", "u128";
    usize => "usize", "usize";
    i8 => "i8", "i8";
    i16 => "i16", "i16";
    i32 => "i32", "i32";
    i64 => "i64", "i64";
    i128 => "i128", "i128";
    isize => "isize", "isize";
    f32 => "f32", "f32";
    f64 => "f64", "f64";
    String => "alloc::string::String", "String";
}

// -----------------------------------------------------------------------------
// Tests
