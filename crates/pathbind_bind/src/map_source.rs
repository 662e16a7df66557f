use std::borrow::Cow;

use pathbind_utils::hash::HashMap;

use crate::{DataSource, Keys};

/// A [`DataSource`] over a case-sensitive string map.
///
/// With the `serde` feature it (de)serializes as a flat map, so a JSON object
/// of strings can be loaded directly.
///
/// # Examples
///
/// ```
/// use pathbind_bind::{DataSource, MapSource};
///
/// let mut source = MapSource::new();
/// source.insert("Name", "Ada");
///
/// assert_eq!(source.get("Name").as_deref(), Some("Ada"));
/// assert!(!source.has("name"));
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct MapSource {
    map: HashMap<String, String>,
}

impl MapSource {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the replaced one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.map.insert(key.into(), value.into())
    }

    #[inline]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.map.remove(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl DataSource for MapSource {
    #[inline]
    fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        self.map.get(key).map(|value| Cow::Borrowed(value.as_str()))
    }

    fn keys(&self) -> Keys<'_> {
        Box::new(self.map.keys().map(|key| Cow::Borrowed(key.as_str())))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = Self::new();
        source.extend(iter);
        source
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for MapSource {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.map
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}
