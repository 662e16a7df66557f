use crate::Reflect;

/// A value that may be absent.
pub trait Nullable: Reflect {
    fn get(&self) -> Option<&dyn Reflect>;

    fn get_mut(&mut self) -> Option<&mut dyn Reflect>;

    fn into_inner(self: Box<Self>) -> Option<Box<dyn Reflect>>;

    /// Stores an inner value, handing it back if it has the wrong type.
    fn set_some(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn set_none(&mut self);
}
