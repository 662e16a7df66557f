use crate::Reflect;
use crate::info::{GenericTypeInfoCell, GenericTypePathCell, NullableInfo, ReflectKind};
use crate::info::{TypeInfo, TypePath, Typed};
use crate::ops::{Nullable, ReflectMut, ReflectOwned, ReflectRef};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

impl<T: Reflect + Typed> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("core::option::Option<{}>", T::type_path()))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("Option<{}>", T::type_name()))
    }
}

fn none_boxed<T: Reflect + Typed>() -> Box<dyn Reflect> {
    Box::new(None::<T>)
}

fn some_boxed<T: Reflect + Typed>(
    value: Box<dyn Reflect>,
) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    let value = value.take::<T>()?;
    Ok(Box::new(Some(value)))
}

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Nullable(NullableInfo::new::<Self, T>(none_boxed::<T>, some_boxed::<T>))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
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
        ReflectKind::Nullable
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Nullable(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Nullable(self)
    }

    #[inline]
    fn reflect_owned(self: Box<Self>) -> ReflectOwned {
        ReflectOwned::Nullable(self)
    }
}

impl<T: Reflect + Typed> Nullable for Option<T> {
    #[inline]
    fn get(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn into_inner(self: Box<Self>) -> Option<Box<dyn Reflect>> {
        (*self).map(|value| Box::new(value) as Box<dyn Reflect>)
    }

    fn set_some(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = Some(value.take::<T>()?);
        Ok(())
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }
}

impl<T: GetTypeMeta + Reflect> GetTypeMeta for Option<T> {
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
    use crate::ops::{Nullable, ReflectRef};

    #[test]
    fn type_path() {
        assert_eq!(<Option<u8>>::type_path(), "core::option::Option<u8>");
        assert_eq!(<Option<String>>::type_name(), "Option<String>");
    }

    #[test]
    fn nullable_info_wraps() {
        let info = <Option<u8>>::type_info().as_nullable().unwrap();
        assert!(info.inner().is::<u8>());

        let some = info.some(Box::new(3_u8)).unwrap();
        assert_eq!(some.take::<Option<u8>>().unwrap(), Some(3));

        let none = info.none();
        assert_eq!(none.take::<Option<u8>>().unwrap(), None);

        assert!(info.some(Box::new(3_u16)).is_err());
    }

    #[test]
    fn nested_generic_constructors() {
        let info = <Option<Vec<u8>>>::type_info().as_nullable().unwrap();
        let list = info.inner_info().as_list().unwrap();

        let items = list.from_items(vec![Box::new(7_u8) as Box<dyn Reflect>]).unwrap();
        let wrapped = info.some(items).unwrap();
        assert_eq!(wrapped.take::<Option<Vec<u8>>>().unwrap(), Some(vec![7]));
    }

    #[test]
    fn set_some_and_none() {
        let mut value: Option<String> = None;
        value.set_some(Box::new(String::from("a"))).unwrap();
        assert_eq!(value.as_deref(), Some("a"));

        let ReflectRef::Nullable(n) = value.reflect_ref() else {
            panic!("expected nullable");
        };
        assert!(n.get().unwrap().is::<String>());

        value.set_none();
        assert!(value.is_none());
    }
}
