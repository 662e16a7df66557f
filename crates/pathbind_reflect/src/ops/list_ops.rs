use crate::Reflect;

/// An ordered, integer-indexed sequence.
pub trait List: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves one item out, dropping the rest.
    fn into_item(self: Box<Self>, index: usize) -> Option<Box<dyn Reflect>>;
}
