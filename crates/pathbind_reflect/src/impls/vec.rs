use crate::Reflect;
use crate::info::{GenericTypeInfoCell, GenericTypePathCell, ListInfo, ReflectKind};
use crate::info::{TypeInfo, TypePath, Typed};
use crate::ops::{List, ReflectMut, ReflectOwned, ReflectRef};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

impl<T: Reflect + Typed> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("alloc::vec::Vec<{}>", T::type_path()))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("Vec<{}>", T::type_name()))
    }
}

pub(super) fn collect_items<T: Reflect>(items: Vec<Box<dyn Reflect>>) -> Option<Vec<T>> {
    items.into_iter().map(|item| item.take::<T>().ok()).collect()
}

fn vec_from_items<T: Reflect + Typed>(items: Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>> {
    let items = collect_items::<T>(items)?;
    Some(Box::new(items))
}

impl<T: Reflect + Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>(vec_from_items::<T>)))
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
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
        ReflectKind::List
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }

    #[inline]
    fn reflect_owned(self: Box<Self>) -> ReflectOwned {
        ReflectOwned::List(self)
    }
}

impl<T: Reflect + Typed> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn into_item(self: Box<Self>, index: usize) -> Option<Box<dyn Reflect>> {
        (*self)
            .into_iter()
            .nth(index)
            .map(|item| Box::new(item) as Box<dyn Reflect>)
    }
}

impl<T: GetTypeMeta + Reflect> GetTypeMeta for Vec<T> {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>().with_trait(<TypeTraitDefault as FromType<Self>>::from_type())
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::List;

    #[test]
    fn type_path() {
        assert_eq!(<Vec<u8>>::type_path(), "alloc::vec::Vec<u8>");
        assert_eq!(<Vec<Option<u8>>>::type_name(), "Vec<Option<u8>>");
    }

    #[test]
    fn from_items_checks_every_item() {
        let info = <Vec<u8>>::type_info().as_list().unwrap();
        assert!(info.item().is::<u8>());
        assert_eq!(info.capacity(), None);

        let built = info
            .from_items(vec![Box::new(1_u8) as Box<dyn Reflect>, Box::new(2_u8)])
            .unwrap();
        assert_eq!(built.take::<Vec<u8>>().unwrap(), vec![1, 2]);

        assert!(info.from_items(vec![Box::new(1_u8) as Box<dyn Reflect>, Box::new(2_u32)]).is_none());
    }

    #[test]
    fn list_access() {
        let mut items = vec![10_u32, 20, 30];
        assert_eq!(List::len(&items), 3);
        assert!(List::get(&items, 3).is_none());

        List::get_mut(&mut items, 1).unwrap().set(Box::new(21_u32)).unwrap();
        assert_eq!(items[1], 21);

        let boxed: Box<dyn List> = Box::new(items);
        let third = boxed.into_item(2).unwrap();
        assert_eq!(third.take::<u32>().unwrap(), 30);
    }
}
