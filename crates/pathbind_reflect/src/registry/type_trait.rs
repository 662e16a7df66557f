use core::any::Any;

/// A capability stored in a [`TypeMeta`](crate::registry::TypeMeta).
///
/// Implemented for every `Clone + Send + Sync + 'static` type.
pub trait TypeTrait: Any + Send + Sync {
    fn clone_type_trait(&self) -> Box<dyn TypeTrait>;
}

impl<T: Clone + Any + Send + Sync> TypeTrait for T {
    #[inline]
    fn clone_type_trait(&self) -> Box<dyn TypeTrait> {
        Box::new(self.clone())
    }
}

/// Builds a type trait for the concrete type `T`.
pub trait FromType<T> {
    fn from_type() -> Self;
}
