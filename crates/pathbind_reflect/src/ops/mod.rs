//! Per-kind traits and the enums that expose them.

// -----------------------------------------------------------------------------
// Modules

mod enum_ops;
mod list_ops;
mod nullable_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use enum_ops::Enum;
pub use list_ops::List;
pub use nullable_ops::Nullable;
pub use struct_ops::Struct;

use crate::Reflect;
use crate::info::ReflectKind;

// -----------------------------------------------------------------------------
// Kind enums

/// An immutable view of a value through its kind trait.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Nullable(&'a dyn Nullable),
    Enum(&'a dyn Enum),
    Opaque(&'a dyn Reflect),
}

/// A mutable view of a value through its kind trait.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Nullable(&'a mut dyn Nullable),
    Enum(&'a mut dyn Enum),
    Opaque(&'a mut dyn Reflect),
}

/// An owned value through its kind trait.
pub enum ReflectOwned {
    Struct(Box<dyn Struct>),
    List(Box<dyn List>),
    Nullable(Box<dyn Nullable>),
    Enum(Box<dyn Enum>),
    Opaque(Box<dyn Reflect>),
}

impl ReflectRef<'_> {
    #[inline]
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Nullable(_) => ReflectKind::Nullable,
            Self::Enum(_) => ReflectKind::Enum,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

impl ReflectOwned {
    /// Converts back to a plain boxed value.
    #[inline]
    pub fn into_reflect(self) -> Box<dyn Reflect> {
        match self {
            Self::Struct(value) => value,
            Self::List(value) => value,
            Self::Nullable(value) => value,
            Self::Enum(value) => value,
            Self::Opaque(value) => value,
        }
    }
}
