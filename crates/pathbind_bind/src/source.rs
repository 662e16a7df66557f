use std::borrow::Cow;

/// Separator between a prefix and a key in hierarchical sources.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Keys of a [`DataSource`].
pub type Keys<'a> = Box<dyn Iterator<Item = Cow<'a, str>> + 'a>;

// -----------------------------------------------------------------------------
// DataSource

/// A flat string-keyed source of raw values.
///
/// Keys are case-sensitive. Hierarchical data is flattened with a
/// separator, e.g. `child.name`, and viewed through [`child`](Self::child).
///
/// # Examples
///
/// ```
/// use pathbind_bind::{DataSource, MapSource};
///
/// let source = MapSource::from_iter([("name", "Ada"), ("child.name", "Byron")]);
///
/// assert!(source.has("name"));
/// assert!(source.has_child("child"));
/// assert!(!source.has_child("name"));
///
/// let child = source.child("child");
/// assert_eq!(child.get("name").as_deref(), Some("Byron"));
/// assert_eq!(child.keys().collect::<Vec<_>>(), ["name"]);
/// ```
pub trait DataSource {
    fn has(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<Cow<'_, str>>;

    fn keys(&self) -> Keys<'_>;

    /// A view of the keys under `prefix`, with the prefix and the default
    /// separator removed.
    fn child(&self, prefix: &str) -> PrefixedSource<'_>
    where
        Self: Sized,
    {
        PrefixedSource::new(self, prefix)
    }

    /// Whether any key lies under `prefix` with the default separator.
    fn has_child(&self, prefix: &str) -> bool {
        self.keys().any(|key| is_under(&key, prefix, DEFAULT_SEPARATOR))
    }
}

#[inline]
fn is_under(key: &str, prefix: &str, separator: &str) -> bool {
    key.strip_prefix(prefix)
        .is_some_and(|rest| rest.len() > separator.len() && rest.starts_with(separator))
}

// -----------------------------------------------------------------------------
// PrefixedSource

/// The keys of another source that start with `{prefix}{separator}`.
pub struct PrefixedSource<'a> {
    parent: &'a dyn DataSource,
    prefix: String,
}

impl<'a> PrefixedSource<'a> {
    #[inline]
    pub fn new(parent: &'a dyn DataSource, prefix: &str) -> Self {
        Self::with_separator(parent, prefix, DEFAULT_SEPARATOR)
    }

    pub fn with_separator(parent: &'a dyn DataSource, prefix: &str, separator: &str) -> Self {
        Self {
            parent,
            prefix: format!("{prefix}{separator}"),
        }
    }

    /// The key in the parent source for `key`.
    #[inline]
    pub fn full_key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }
}

impl DataSource for PrefixedSource<'_> {
    fn has(&self, key: &str) -> bool {
        self.parent.has(&self.full_key(key))
    }

    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        self.parent.get(&self.full_key(key))
    }

    fn keys(&self) -> Keys<'_> {
        let prefix = self.prefix.as_str();
        Box::new(self.parent.keys().filter_map(move |key| match key {
            Cow::Borrowed(key) => key.strip_prefix(prefix).map(Cow::Borrowed),
            Cow::Owned(key) => key.strip_prefix(prefix).map(|rest| Cow::Owned(rest.to_owned())),
        }))
    }
}

impl core::fmt::Debug for PrefixedSource<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrefixedSource")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests
