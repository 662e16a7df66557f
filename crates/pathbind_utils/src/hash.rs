//! Provide `FixedHashState` and `NoOpHashState`.
//!
//! `FixedHashState` is based on `foldhash` with a fixed seed, so hash results
//! only depend on the input. `NoOpHashState` passes `u64` keys (such as
//! [`TypeId`](core::any::TypeId)) straight through.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

pub use hashbrown;

// -----------------------------------------------------------------------------
// FixedHashState

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5A17_B1D0_C0DE_F00D);

/// A hasher whose results only depend on the input.
pub type FixedHasher = FoldHasher<'static>;

/// Fixed hash state based upon a fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use pathbind_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("name");
/// let b = FixedHashState.hash_one("name");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHashState

/// A hasher that keeps the last written `u64` as the hash.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`].
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher::default()
    }
}

// -----------------------------------------------------------------------------
// Aliases

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`].
pub type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{FixedHashState, NoOpHashState};
    use core::any::TypeId;
    use core::hash::BuildHasher;

    #[test]
    fn fixed_state_is_stable() {
        assert_eq!(
            FixedHashState.hash_one((1_u32, "a")),
            FixedHashState.hash_one((1_u32, "a")),
        );
        assert_ne!(FixedHashState.hash_one(1_u32), FixedHashState.hash_one(2_u32));
    }

    #[test]
    fn noop_state_distinguishes_type_ids() {
        assert_ne!(
            NoOpHashState.hash_one(TypeId::of::<u8>()),
            NoOpHashState.hash_one(TypeId::of::<u16>()),
        );
    }
}
