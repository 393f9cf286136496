use thiserror::Error;

pub mod hash;
mod hash_table;
pub mod resolve;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// A table needs at least one bucket to hash into
    #[error("Cannot create a hash table with 0 buckets")]
    ZeroBuckets,
}

pub use hash_table::{HashTable, Iter};
