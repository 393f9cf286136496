//! Byte-sum hashing.
//!
//! A key's slot is the sum of its bytes, plus one zero terminator byte,
//! reduced modulo the bucket count. Bytes are added as unsigned values
//! with wrapping arithmetic, so the terminator never changes the sum and
//! the slot is always `sum(bytes) % size`.
//!
//! Anagrams share a slot and distribution is poor. The scheme is kept
//! because slot placement is reproducible across builds and platforms.

use std::hash::Hasher;

/// The terminator byte folded into every key's sum
pub const TERMINATOR: u8 = 0;

/// A [`Hasher`] that sums every byte it is fed
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteSumHasher {
    sum: u64,
}

impl ByteSumHasher {
    pub const fn new() -> Self {
        Self { sum: 0 }
    }
}

impl Hasher for ByteSumHasher {
    fn finish(&self) -> u64 {
        self.sum
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.sum = self.sum.wrapping_add(b as u64);
        }
    }
}

/// Hashes `key` the way the table does, terminator included
pub fn hash(key: &[u8]) -> u64 {
    let mut h = ByteSumHasher::new();
    h.write(key);
    h.write_u8(TERMINATOR);
    h.finish()
}

/// Maps `key` to a slot in `[0, size)`
///
/// # Panics
///
/// Panics if `size` is 0
#[inline]
pub fn slot_index(key: &[u8], size: usize) -> usize {
    (hash(key) % size as u64) as usize
}
