use core::any::TypeId;
use std::sync::{OnceLock, PoisonError, RwLock};

use pathbind_utils::TypeIdMap;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Lazily initialised storage for the [`TypeInfo`] of a non-generic type.
///
/// # Examples
///
/// ```
/// use pathbind_reflect::info::{NonGenericTypeInfoCell, OpaqueInfo, TypeInfo, TypePath, Typed};
///
/// struct Token;
///
/// impl TypePath for Token {
///     fn type_path() -> &'static str { "demo::Token" }
///     fn type_name() -> &'static str { "Token" }
/// }
///
/// impl Typed for Token {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert_eq!(Token::type_info().type_name(), "Token");
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&'static self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Storage for the [`TypeInfo`] of every instantiation of a generic type.
///
/// A `static` inside a generic function is shared by all instantiations, so
/// entries are keyed by the [`TypeId`] of the instantiation. Entries are
/// leaked to obtain `'static` references.
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info for `G`, building it with `f` on first use.
    ///
    /// `f` runs without the lock held.
    pub fn get_or_insert<G: 'static>(
        &'static self,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        let type_id = TypeId::of::<G>();

        let cached = self.0.read().unwrap_or_else(PoisonError::into_inner).get(type_id).copied();
        if let Some(info) = cached {
            return info;
        }

        let built = f();

        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(type_id, || Box::leak(Box::new(built)))
    }
}

// -----------------------------------------------------------------------------
// GenericTypePathCell

/// Storage for formatted type paths of generic instantiations.
pub struct GenericTypePathCell(RwLock<TypeIdMap<&'static str>>);

impl GenericTypePathCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    pub fn get_or_insert<G: 'static>(&'static self, f: impl FnOnce() -> String) -> &'static str {
        let type_id = TypeId::of::<G>();

        let cached = self.0.read().unwrap_or_else(PoisonError::into_inner).get(type_id).copied();
        if let Some(path) = cached {
            return path;
        }

        let built = f();

        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(type_id, || built.leak())
    }
}
