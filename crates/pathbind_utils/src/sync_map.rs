use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use crate::TypeIdMap;

/// A [`TypeIdMap`] behind a [`RwLock`], for caches that are read far more
/// often than they are written.
///
/// Values are handed out by clone, so `V` is usually an `Arc` or a small
/// `Copy` handle. Lock poisoning is ignored: every write is a single insert,
/// so a panicking writer cannot leave a half-updated entry behind.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use pathbind_utils::SyncTypeIdMap;
///
/// let cache = SyncTypeIdMap::<u32>::new();
/// let a = cache.get_or_insert_with(TypeId::of::<u8>(), || 1);
/// let b = cache.get_or_insert_with(TypeId::of::<u8>(), || 2);
/// assert_eq!((a, b), (1, 1));
/// ```
pub struct SyncTypeIdMap<V> {
    inner: RwLock<TypeIdMap<V>>,
}

impl<V: Clone> SyncTypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            inner: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns a clone of the cached value.
    pub fn get(&self, type_id: TypeId) -> Option<V> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_id)
            .cloned()
    }

    /// Returns the cached value, or computes one with `f` and caches it.
    ///
    /// `f` runs without holding the lock, so it may consult this map again.
    /// When several threads race on the same key, each may run `f`, but
    /// only the first insert is kept and every caller receives that value.
    pub fn get_or_insert_with(&self, type_id: TypeId, f: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(type_id) {
            return value;
        }

        let value = f();

        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(type_id, || value)
            .clone()
    }

    /// Inserts a value unconditionally, returning the replaced one.
    pub fn insert(&self, type_id: TypeId, value: V) -> Option<V> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(type_id, value)
    }

    pub fn remove(&self, type_id: TypeId) -> Option<V> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(type_id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl<V: Clone> Default for SyncTypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for SyncTypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("SyncTypeIdMap").field("inner", &*map).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::SyncTypeIdMap;
    use core::any::TypeId;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn first_writer_wins_across_threads() {
        let cache = Arc::new(SyncTypeIdMap::<usize>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    cache.get_or_insert_with(TypeId::of::<String>(), || {
                        calls.fetch_add(1, Ordering::Relaxed);
                        n
                    })
                })
            })
            .collect();

        let seen: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(seen.iter().all(|v| *v == seen[0]));
        assert!(calls.load(Ordering::Relaxed) >= 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn reentrant_compute() {
        let cache = SyncTypeIdMap::<u32>::new();
        let v = cache.get_or_insert_with(TypeId::of::<u8>(), || {
            cache.get_or_insert_with(TypeId::of::<u16>(), || 7) + 1
        });
        assert_eq!(v, 8);
        assert_eq!(cache.get(TypeId::of::<u16>()), Some(7));
    }
}
