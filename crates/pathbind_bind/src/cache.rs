use core::any::{Any, TypeId};
use core::fmt;
use std::sync::Arc;

use pathbind_convert::Conversions;
use pathbind_reflect::Reflect;
use pathbind_reflect::registry::GetTypeMeta;
use pathbind_utils::SyncTypeIdMap;

use crate::{Binder, BinderOptions, ConstructionError};

/// Binders compiled on first use, one per destination type.
///
/// Safe to share between threads. When several threads ask for the same
/// type at once each may compile a binder, but only the first one is kept
/// and returned to all of them.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use pathbind_bind::{BinderCache, MapSource};
/// use pathbind_convert::Conversions;
/// use pathbind_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Settings {
///     verbose: bool,
/// }
///
/// let cache = BinderCache::new(Arc::new(Conversions::new()));
///
/// let binder = cache.binder::<Settings>().unwrap();
/// assert!(Arc::ptr_eq(&binder, &cache.binder::<Settings>().unwrap()));
///
/// let settings = binder.build(&MapSource::from_iter([("verbose", "True")])).unwrap();
/// assert!(settings.verbose);
/// ```
pub struct BinderCache {
    conversions: Arc<Conversions>,
    options: BinderOptions,
    binders: SyncTypeIdMap<Arc<dyn Any + Send + Sync>>,
}

impl BinderCache {
    #[inline]
    pub fn new(conversions: Arc<Conversions>) -> Self {
        Self::with_options(conversions, BinderOptions::default())
    }

    pub fn with_options(conversions: Arc<Conversions>, options: BinderOptions) -> Self {
        Self {
            conversions,
            options,
            binders: SyncTypeIdMap::new(),
        }
    }

    #[inline]
    pub fn conversions(&self) -> &Conversions {
        &self.conversions
    }

    /// The binder for `T`, compiled on first use.
    pub fn binder<T: GetTypeMeta + Reflect>(&self) -> Result<Arc<Binder<T>>, ConstructionError> {
        let id = TypeId::of::<T>();

        let erased = match self.binders.get(id) {
            Some(erased) => {
                log::trace!("binder cache hit for `{}`", T::type_path());
                erased
            }
            None => {
                let compiled: Arc<dyn Any + Send + Sync> =
                    Arc::new(Binder::<T>::with_options(&self.conversions, self.options)?);
                self.binders.get_or_insert_with(id, || compiled)
            }
        };

        match erased.downcast::<Binder<T>>() {
            Ok(binder) => Ok(binder),
            Err(_) => unreachable!("binder cache entries are keyed by their own type"),
        }
    }

    /// Number of compiled binders.
    #[inline]
    pub fn len(&self) -> usize {
        self.binders.len()
    }
}

impl fmt::Debug for BinderCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinderCache")
            .field("options", &self.options)
            .field("binders", &self.binders.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use pathbind_convert::Conversions;
    use pathbind_reflect::derive::Reflect;

    use super::BinderCache;
    use crate::{ConstructionError, MapSource};

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Job {
        id: u64,
        retries: u8,
    }

    #[test]
    fn first_compile_wins() {
        let cache = BinderCache::new(Arc::new(Conversions::new()));

        let binders: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| cache.binder::<Job>().unwrap())).collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), 1);
        assert!(binders.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));

        let job = binders[0].build(&MapSource::from_iter([("id", "7"), ("retries", "3")])).unwrap();
        assert_eq!((job.id, job.retries), (7, 3));
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = BinderCache::new(Arc::new(Conversions::new()));
        assert!(matches!(cache.binder::<u32>(), Err(ConstructionError::NotAStruct { .. })));
        assert_eq!(cache.len(), 0);
    }
}
