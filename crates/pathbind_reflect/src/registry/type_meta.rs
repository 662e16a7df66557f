use core::any::{Any, TypeId};
use core::fmt;

use pathbind_utils::TypeIdMap;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::TypeTrait;

/// Runtime metadata of a type: its [`TypeInfo`] plus type traits.
///
/// # Examples
///
/// ```
/// use pathbind_reflect::registry::{FromType, TypeMeta, TypeTraitDefault};
///
/// let mut meta = TypeMeta::of::<u32>();
/// meta.insert_trait(<TypeTraitDefault as FromType<u32>>::from_type());
/// assert!(meta.has_trait::<TypeTraitDefault>());
/// ```
pub struct TypeMeta {
    info: &'static TypeInfo,
    traits: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// Metadata without any type traits.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self {
            info: T::type_info(),
            traits: TypeIdMap::new(),
        }
    }

    #[inline]
    pub const fn info(&self) -> &'static TypeInfo {
        self.info
    }

    #[inline]
    pub fn ty(&self) -> &'static Type {
        self.info.ty()
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.info.type_id()
    }

    /// Inserts a type trait, replacing an existing one of the same type.
    #[inline]
    pub fn insert_trait<D: TypeTrait>(&mut self, data: D) {
        self.traits.insert(TypeId::of::<D>(), Box::new(data));
    }

    #[inline]
    pub fn with_trait<D: TypeTrait>(mut self, data: D) -> Self {
        self.insert_trait(data);
        self
    }

    #[inline]
    pub fn get_trait<D: TypeTrait>(&self) -> Option<&D> {
        let data: &dyn Any = &**self.traits.get(TypeId::of::<D>())?;
        data.downcast_ref::<D>()
    }

    #[inline]
    pub fn has_trait<D: TypeTrait>(&self) -> bool {
        self.traits.contains(TypeId::of::<D>())
    }

    #[inline]
    pub fn trait_len(&self) -> usize {
        self.traits.len()
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut traits = TypeIdMap::new();
        for (id, data) in self.traits.iter() {
            traits.insert(id, (**data).clone_type_trait());
        }
        Self {
            info: self.info,
            traits,
        }
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type", self.ty())
            .field("kind", &self.info.kind())
            .field("traits", &self.traits.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeMeta;
    use crate::registry::{FromType, TypeTraitDefault};

    #[test]
    fn clone_keeps_traits() {
        let meta = TypeMeta::of::<String>()
            .with_trait(<TypeTraitDefault as FromType<String>>::from_type());
        let copy = meta.clone();
        drop(meta);

        assert_eq!(copy.trait_len(), 1);
        let ctor = copy.get_trait::<TypeTraitDefault>().unwrap();
        assert_eq!(ctor.default().take::<String>().unwrap(), "");
    }
}
