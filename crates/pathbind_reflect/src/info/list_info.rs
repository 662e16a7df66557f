use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed};

/// Shape of `Vec<T>` and `[T; N]`.
#[derive(Debug)]
pub struct ListInfo {
    ty: Type,
    item: Type,
    item_info: fn() -> &'static TypeInfo,
    capacity: Option<usize>,
    from_items: fn(Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>,
}

impl ListInfo {
    /// `from_items` rebuilds the list from boxed items, returning `None` if
    /// an item has the wrong type or the count does not fit.
    #[inline]
    pub fn new<L: TypePath, I: Typed>(
        from_items: fn(Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            ty: Type::of::<L>(),
            item: Type::of::<I>(),
            item_info: I::type_info,
            capacity: None,
            from_items,
        }
    }

    /// Fixes the element count, used by arrays.
    #[inline]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn item(&self) -> &Type {
        &self.item
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// `Some(N)` for `[T; N]`.
    #[inline]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    #[inline]
    pub fn from_items(&self, items: Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>> {
        (self.from_items)(items)
    }
}
