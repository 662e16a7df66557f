use crate::Reflect;
use crate::info::{GenericTypeInfoCell, GenericTypePathCell, ListInfo, ReflectKind};
use crate::info::{TypeInfo, TypePath, Typed};
use crate::ops::{List, ReflectMut, ReflectOwned, ReflectRef};
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

use super::vec::collect_items;

impl<T: Reflect + Typed, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("[{}; {N}]", T::type_path()))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("[{}; {N}]", T::type_name()))
    }
}

fn array_from_items<T: Reflect + Typed, const N: usize>(
    items: Vec<Box<dyn Reflect>>,
) -> Option<Box<dyn Reflect>> {
    let array: [T; N] = collect_items::<T>(items)?.try_into().ok()?;
    Some(Box::new(array))
}

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::List(ListInfo::new::<Self, T>(array_from_items::<T, N>).with_capacity(N))
        })
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
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

impl<T: Reflect + Typed, const N: usize> List for [T; N] {
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
        N
    }

    fn into_item(self: Box<Self>, index: usize) -> Option<Box<dyn Reflect>> {
        (*self)
            .into_iter()
            .nth(index)
            .map(|item| Box::new(item) as Box<dyn Reflect>)
    }
}

impl<T: GetTypeMeta + Reflect, const N: usize> GetTypeMeta for [T; N] {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
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

    #[test]
    fn fixed_capacity() {
        assert_eq!(<[u8; 3]>::type_path(), "[u8; 3]");

        let info = <[u8; 2]>::type_info().as_list().unwrap();
        assert_eq!(info.capacity(), Some(2));

        let items = || vec![Box::new(1_u8) as Box<dyn Reflect>, Box::new(2_u8)];
        let built = info.from_items(items()).unwrap();
        assert_eq!(built.take::<[u8; 2]>().unwrap(), [1, 2]);

        let mut three = items();
        three.push(Box::new(3_u8));
        assert!(info.from_items(three).is_none());
    }
}
