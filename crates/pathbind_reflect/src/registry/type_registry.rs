use core::any::TypeId;

use pathbind_utils::TypeIdMap;

use crate::info::TypeInfo;
use crate::registry::{GetTypeMeta, TypeMeta, TypeTrait};

/// A map from [`TypeId`] to [`TypeMeta`].
///
/// [`TypeRegistry::new`] pre-registers primitives and `String`.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use pathbind_reflect::registry::{TypeRegistry, TypeTraitDefault};
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Vec<Option<u8>>>();
///
/// assert!(registry.contains(TypeId::of::<Option<u8>>()));
/// assert!(registry.get_type_trait::<TypeTraitDefault>(TypeId::of::<Vec<Option<u8>>>()).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    metas: TypeIdMap<TypeMeta>,
}

impl TypeRegistry {
    /// A registry without any types.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            metas: TypeIdMap::new(),
        }
    }

    /// A registry with primitives and `String` registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry
    }

    /// Registers `T` and its dependencies.
    ///
    /// Returns `false` if `T` was already registered, in which case nothing
    /// changes.
    pub fn register<T: GetTypeMeta>(&mut self) -> bool {
        if !self.metas.try_insert(TypeId::of::<T>(), T::get_type_meta) {
            return false;
        }
        log::trace!("registered type `{}`", T::type_path());
        T::register_dependencies(self);
        true
    }

    /// Inserts a meta directly, replacing any previous one.
    #[inline]
    pub fn insert(&mut self, meta: TypeMeta) {
        self.metas.insert(meta.type_id(), meta);
    }

    /// Adds a type trait to an already registered type.
    ///
    /// Returns `false` if the type is not registered.
    pub fn insert_type_trait<D: TypeTrait>(&mut self, type_id: TypeId, data: D) -> bool {
        match self.metas.get_mut(type_id) {
            Some(meta) => {
                meta.insert_trait(data);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.metas.get(type_id)
    }

    #[inline]
    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.metas.get(type_id).map(TypeMeta::info)
    }

    #[inline]
    pub fn get_type_trait<D: TypeTrait>(&self, type_id: TypeId) -> Option<&D> {
        self.metas.get(type_id)?.get_trait::<D>()
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.metas.contains(type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.metas.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &TypeMeta> {
        self.metas.values()
    }
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
