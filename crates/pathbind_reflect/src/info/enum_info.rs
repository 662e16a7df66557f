use crate::Reflect;
use crate::info::{Type, TypePath};

/// Shape of an enum whose variants carry no data.
#[derive(Debug)]
pub struct EnumInfo {
    ty: Type,
    variants: Box<[&'static str]>,
    from_index: fn(usize) -> Option<Box<dyn Reflect>>,
}

impl EnumInfo {
    #[inline]
    pub fn new<T: TypePath>(
        variants: &[&'static str],
        from_index: fn(usize) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            variants: variants.into(),
            from_index,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn variants(&self) -> &[&'static str] {
        &self.variants
    }

    #[inline]
    pub fn variant_name(&self, index: usize) -> Option<&'static str> {
        self.variants.get(index).copied()
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| *v == name)
    }

    /// ASCII case-insensitive variant lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathbind_reflect::{derive::Reflect, info::Typed};
    ///
    /// #[derive(Reflect)]
    /// enum Color { Red, DarkBlue }
    ///
    /// let info = Color::type_info().as_enum().unwrap();
    /// assert_eq!(info.index_of_ignore_case("darkblue"), Some(1));
    /// assert_eq!(info.index_of_ignore_case("green"), None);
    /// ```
    #[inline]
    pub fn index_of_ignore_case(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.eq_ignore_ascii_case(name))
    }

    /// Builds the variant at `index`.
    #[inline]
    pub fn from_index(&self, index: usize) -> Option<Box<dyn Reflect>> {
        (self.from_index)(index)
    }
}
