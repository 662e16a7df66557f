use crate::Reflect;

/// A struct with named fields.
///
/// Indices follow declaration order and match
/// [`StructInfo`](crate::info::StructInfo).
pub trait Struct: Reflect {
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn name_at(&self, index: usize) -> Option<&'static str>;

    fn field_len(&self) -> usize;

    /// Moves one field out, dropping the rest.
    fn into_field_at(self: Box<Self>, index: usize) -> Option<Box<dyn Reflect>>;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::derive::Reflect;
    use crate::info::{ReflectKind, TypePath, Typed};
    use crate::ops::{ReflectMut, ReflectOwned, ReflectRef};
    use crate::registry::{TypeRegistry, TypeTraitDefault, TypeTraitFromStr};

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Inner {
        value: u32,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default, method(doubled))]
    struct Outer {
        name: String,
        #[reflect(skip)]
        cache: u64,
        inner: Option<Inner>,
        #[reflect(readonly)]
        id: u32,
    }

    impl Outer {
        fn doubled(&self) -> u32 {
            self.id * 2
        }
    }

    #[test]
    fn derived_info() {
        assert_eq!(Outer::type_path(), "pathbind_reflect::ops::struct_ops::tests::Outer");
        assert_eq!(Outer::type_name(), "Outer");

        let info = Outer::type_info().as_struct().unwrap();
        assert_eq!(info.field_len(), 3);
        assert_eq!(info.field_at(1).unwrap().name(), "inner");
        assert!(info.field("cache").is_none());
        assert!(info.field("name").unwrap().is_writable());
        assert!(!info.field("id").unwrap().is_writable());
        assert!(info.field("inner").unwrap().ty().is::<Option<Inner>>());
        assert_eq!(info.method("doubled").unwrap().arity(), 0);
        assert!(info.method("doubled").unwrap().return_type().is::<u32>());
    }

    #[test]
    fn field_access() {
        let mut outer = Outer {
            name: "a".into(),
            cache: 9,
            inner: None,
            id: 4,
        };

        let ReflectMut::Struct(s) = outer.reflect_mut() else {
            panic!("expected struct");
        };
        s.field_mut("name").unwrap().set(Box::new(String::from("b"))).unwrap();
        s.field_at_mut(1)
            .unwrap()
            .set(Box::new(Some(Inner { value: 1 })))
            .unwrap();
        assert_eq!(s.name_at(2), Some("id"));
        assert!(s.field_at(3).is_none());

        assert_eq!(outer.name, "b");
        assert_eq!(outer.inner, Some(Inner { value: 1 }));
        assert_eq!(outer.cache, 9);

        let ReflectRef::Struct(s) = outer.reflect_ref() else {
            panic!("expected struct");
        };
        assert_eq!(s.field("id").unwrap().downcast_ref::<u32>(), Some(&4));
    }

    #[test]
    fn move_field_out() {
        let outer: Box<dyn Reflect> = Box::new(Outer {
            name: "moved".into(),
            ..Default::default()
        });
        assert_eq!(outer.reflect_kind(), ReflectKind::Struct);

        let ReflectOwned::Struct(s) = outer.reflect_owned() else {
            panic!("expected struct");
        };
        let name = s.into_field_at(0).unwrap();
        assert_eq!(name.take::<String>().unwrap(), "moved");
    }

    #[test]
    fn registration_follows_fields() {
        let mut registry = TypeRegistry::empty();
        assert!(registry.register::<Outer>());
        assert!(!registry.register::<Outer>());

        assert!(registry.contains(core::any::TypeId::of::<Option<Inner>>()));
        assert!(registry.contains(core::any::TypeId::of::<Inner>()));

        let meta = registry.get(core::any::TypeId::of::<Outer>()).unwrap();
        assert!(meta.has_trait::<TypeTraitDefault>());
        assert!(!meta.has_trait::<TypeTraitFromStr>());

        let built = meta.get_trait::<TypeTraitDefault>().unwrap().default();
        assert_eq!(built.take::<Outer>().unwrap(), Outer::default());
    }

    #[test]
    fn reflect_debug() {
        let outer = Outer {
            name: "x".into(),
            inner: Some(Inner { value: 3 }),
            ..Default::default()
        };
        let text = format!("{:?}", outer.as_reflect());
        assert_eq!(text, r#"Outer { name: "x", inner: Some(Inner { value: 3 }), id: 0 }"#);
    }
}
