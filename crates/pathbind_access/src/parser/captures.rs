use core::fmt;

use pathbind_reflect::Reflect;
use pathbind_utils::hash::HashMap;

/// Named values an accessor path may read while it is folded.
///
/// Values are only read while the accessor is built; the accessor keeps the
/// folded result, not the reference.
///
/// # Examples
///
/// ```
/// use pathbind_access::Captures;
///
/// let offset = 2_usize;
/// let captures = Captures::new().with("offset", &offset);
/// assert!(captures.get("offset").is_some());
/// assert!(captures.get("other").is_none());
/// ```
#[derive(Default, Clone)]
pub struct Captures<'a> {
    values: HashMap<&'a str, &'a dyn Reflect>,
}

impl<'a> Captures<'a> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, replacing one of the same name.
    #[inline]
    pub fn with(mut self, name: &'a str, value: &'a dyn Reflect) -> Self {
        self.insert(name, value);
        self
    }

    #[inline]
    pub fn insert(&mut self, name: &'a str, value: &'a dyn Reflect) {
        self.values.insert(name, value);
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&'a dyn Reflect> {
        self.values.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Captures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.values.iter()).finish()
    }
}
