//! Ready-made collision resolvers for [`HashTable::insert`](super::HashTable::insert).
//!
//! A resolver gets the stored value and the incoming one and returns what
//! the entry should hold afterwards. Anything with the shape
//! `FnOnce(V, V) -> V` works; these are just the common cases.

/// The incoming value replaces the stored one
#[inline]
pub fn overwrite<V>(_old: V, new: V) -> V {
    new
}

/// The stored value stays, the incoming one is dropped
#[inline]
pub fn keep<V>(old: V, _new: V) -> V {
    old
}
