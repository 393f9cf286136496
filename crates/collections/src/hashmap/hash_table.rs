use std::borrow::Cow;

use log::{debug, trace};

use super::{TableError, hash::slot_index};
use crate::linked_list::{self, Inserted, List};

/// A hash table with a fixed number of buckets, each bucket a chain of entries.
///
/// The bucket count is picked once in [`HashTable::new`] and never changes,
/// so long chains are the price of a too-small table.
#[derive(Debug)]
pub struct HashTable<K, V> {
    pub(crate) buckets: Box<[List<K, V>]>,
}

/// Iterator over a table's entries, bucket by bucket
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    ht: &'a HashTable<K, V>,
    chain: linked_list::Iter<'a, K, V>,
    bucket_idx: usize,
}

impl<K, V> HashTable<K, V> {
    /// Creates a new `HashTable` with `size` many buckets
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0, see [`HashTable::try_new`]
    /// for a version that reports it instead
    pub fn new(size: usize) -> Self {
        match Self::try_new(size) {
            Ok(table) => table,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates a new `HashTable` with `size` many empty buckets
    pub fn try_new(size: usize) -> Result<Self, TableError> {
        if size == 0 {
            return Err(TableError::ZeroBuckets);
        }

        trace!(target: "create", "allocating {size} buckets");
        Ok(Self {
            buckets: (0..size).map(|_| List::new()).collect(),
        })
    }

    /// Returns the number of entries in the table
    pub fn len(&self) -> usize {
        self.buckets.iter().map(List::len).sum()
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(List::is_empty)
    }

    /// Returns the number of buckets, or "slots" of the hash table
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Length of the chain in bucket `slot`, `None` if there is no such bucket
    pub fn chain_len(&self, slot: usize) -> Option<usize> {
        self.buckets.get(slot).map(List::len)
    }

    /// Returns the load factor of the hash table
    /// computed as num of entries / num of buckets
    pub fn load_factor(&self) -> f32 {
        self.len() as f32 / self.bucket_count() as f32
    }

    /// Calls `visit` once per entry, buckets in index order,
    /// entries of one bucket in insertion order
    pub fn iterate<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a K, &'a V),
    {
        for (key, value) in self.iter() {
            visit(key, value);
        }
    }

    /// Tears the table down, handing every value to `destroy_value` exactly once.
    ///
    /// Values are visited in the same order as [`HashTable::iterate`].
    /// Dropping the table instead drops every value in place.
    pub fn destroy<F>(self, mut destroy_value: F)
    where
        F: FnMut(V),
    {
        trace!(target: "destroy", "releasing {} entries", self.len());
        for chain in self.buckets.into_vec() {
            for (_, value) in chain {
                destroy_value(value);
            }
        }
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            ht: self,
            chain: self.buckets[0].iter(),
            bucket_idx: 0,
        }
    }
}

impl<K: AsRef<[u8]>, V> HashTable<K, V> {
    /// Returns the bucket `key` hashes to
    pub fn slot_of<Q>(&self, key: &Q) -> usize
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        slot_index(key.as_ref(), self.bucket_count())
    }

    /// Inserts `key`/`value` into the table.
    ///
    /// A new key is appended to the tail of its bucket's chain.
    /// If the key is already present its value becomes `resolve(old, value)`,
    /// the stored key is kept and `key` is dropped.
    /// `resolve` runs at most once and only on a collision with an equal key.
    pub fn insert<F>(&mut self, key: K, value: V, resolve: F) -> Inserted
    where
        F: FnOnce(V, V) -> V,
    {
        let i = self.slot_of(&key);
        trace!(target: "insert", "key {:?} -> slot {i}", lossy(key.as_ref()));

        let inserted = self.buckets[i].upsert(key, value, resolve);
        if inserted == Inserted::Merged {
            debug!(target: "insert", "duplicate key in slot {i}, value merged by resolver");
        }
        inserted
    }

    /// Returns the value stored under `key`, `None` if there is none
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let i = self.slot_of(key);
        self.buckets[i].get(key.as_ref())
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let i = self.slot_of(key);
        self.buckets[i].get_mut(key.as_ref())
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes the entry for `key`, returning the stored key and value
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let i = self.slot_of(key);
        let removed = self.buckets[i].remove(key.as_ref());
        trace!(
            target: "remove",
            "key {:?} in slot {i}: {}",
            lossy(key.as_ref()),
            if removed.is_some() { "removed" } else { "not found" }
        );
        removed
    }

    /// Removes the entry for `key` and hands its value back
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry for `key`, passing its value to `destroy_value`.
    ///
    /// Returns whether an entry was found; a missing key is not an error
    /// and leaves `destroy_value` uncalled.
    pub fn remove_with<Q, F>(&mut self, key: &Q, destroy_value: F) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
        F: FnOnce(V),
    {
        match self.remove(key) {
            Some(value) => {
                destroy_value(value);
                true
            }
            None => false,
        }
    }
}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.chain.next() {
                Some(node) => return Some((node.key(), node.value())),
                None => {
                    if self.bucket_idx + 1 >= self.ht.bucket_count() {
                        return None;
                    }
                    self.bucket_idx += 1;
                    self.chain = self.ht.buckets[self.bucket_idx].iter();
                }
            }
        }
    }
}

fn lossy(key: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(key)
}
