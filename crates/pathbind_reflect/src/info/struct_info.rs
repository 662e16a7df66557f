use pathbind_utils::hash::{FixedHashState, HashMap};

use crate::info::{MethodInfo, Type, TypeInfo, TypePath, Typed};

// -----------------------------------------------------------------------------
// NamedField

/// A named field of a struct.
#[derive(Clone, Debug)]
pub struct NamedField {
    name: &'static str,
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
    writable: bool,
}

impl NamedField {
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty: Type::of::<T>(),
            type_info: T::type_info,
            writable: true,
        }
    }

    /// Marks the field as not externally writable.
    ///
    /// Generated by `#[reflect(readonly)]`.
    #[inline]
    pub const fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.writable
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// A container for compile-time named struct info.
///
/// Fields keep declaration order; `#[reflect(skip)]` fields are absent and
/// do not take an index.
///
/// # Examples
///
/// ```
/// use pathbind_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Person {
///     name: String,
///     #[reflect(readonly)]
///     id: u64,
/// }
///
/// let info = Person::type_info().as_struct().unwrap();
/// assert_eq!(info.index_of("id"), Some(1));
/// assert!(!info.field("id").unwrap().is_writable());
/// ```
#[derive(Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    field_indices: HashMap<&'static str, usize>,
    methods: Box<[MethodInfo]>,
}

impl StructInfo {
    pub fn new<T: TypePath>(fields: &[NamedField]) -> Self {
        let mut field_indices = HashMap::with_capacity_and_hasher(fields.len(), FixedHashState);
        for (index, field) in fields.iter().enumerate() {
            field_indices.insert(field.name(), index);
        }

        Self {
            ty: Type::of::<T>(),
            fields: fields.to_vec().into_boxed_slice(),
            field_indices,
            methods: Box::new([]),
        }
    }

    /// Attaches callable methods, generated by `#[reflect(method(..))]`.
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = MethodInfo>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.field_indices.get(name).map(|index| &self.fields[*index])
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates fields in declaration order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, NamedField> {
        self.fields.iter()
    }

    #[inline]
    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|method| method.name() == name)
    }

    #[inline]
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }
}
