//! A string key/value store on top of [`collections::HashTable`],
//! driven by a small line protocol.

pub mod protocol;
pub mod storage;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Derived IO error
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),

    /// The table could not be built, e.g. asked for 0 buckets
    #[error("Table error: {0}")]
    Table(#[from] collections::TableError),

    /// A setting from the environment could not be used
    #[error("Invalid configuration: {0}")]
    Config(String),
}
