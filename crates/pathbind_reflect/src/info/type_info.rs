use core::any::TypeId;
use core::fmt;

use crate::info::{EnumInfo, ListInfo, NullableInfo, OpaqueInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// The shape of a reflected type, without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    List,
    Nullable,
    Enum,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Struct => "struct",
            Self::List => "list",
            Self::Nullable => "nullable",
            Self::Enum => "enum",
            Self::Opaque => "opaque",
        })
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time shape of a reflected type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info),
/// always as a `&'static` reference.
#[derive(Debug)]
pub enum TypeInfo {
    /// A struct with named fields.
    Struct(StructInfo),
    /// `Vec<T>` or `[T; N]`.
    List(ListInfo),
    /// `Option<T>`.
    Nullable(NullableInfo),
    /// An enum whose variants carry no data.
    Enum(EnumInfo),
    /// Everything else: primitives, `String`.
    Opaque(OpaqueInfo),
}

impl TypeInfo {
    #[inline]
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Nullable(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.ty().is::<T>()
    }

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

    #[inline]
    pub const fn as_struct(&self) -> Option<&StructInfo> {
        match self {
            Self::Struct(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_list(&self) -> Option<&ListInfo> {
        match self {
            Self::List(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_nullable(&self) -> Option<&NullableInfo> {
        match self {
            Self::Nullable(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_enum(&self) -> Option<&EnumInfo> {
        match self {
            Self::Enum(info) => Some(info),
            _ => None,
        }
    }

    /// Strips every `Option` layer, returning the innermost type.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathbind_reflect::info::Typed;
    ///
    /// let info = <Option<Option<u8>>>::type_info().strip_nullable();
    /// assert!(info.is::<u8>());
    /// ```
    pub fn strip_nullable(&'static self) -> &'static TypeInfo {
        let mut info = self;
        while let Self::Nullable(nullable) = info {
            info = nullable.inner_info();
        }
        info
    }
}
