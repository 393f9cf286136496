//! Fixed-size, separately chained hash table.
//!
//! [`HashTable`] owns a bucket array chosen at construction time and never
//! resizes. Each bucket is a [`List`] of entries whose keys hashed to it
//! under the byte-sum scheme in [`hashmap::hash`]. Inserting an existing
//! key does not overwrite on its own: the caller passes a resolver that
//! merges the stored and incoming values (see [`hashmap::resolve`]).
//!
//! The table is single-threaded. Every mutation needs `&mut HashTable`,
//! so callbacks can never re-enter the table they were called from.

mod macros;

pub mod hashmap;
pub mod linked_list;

pub use hashmap::{HashTable, TableError, resolve};
pub use linked_list::{Inserted, List};
