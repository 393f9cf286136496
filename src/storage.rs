use std::env::{self, VarError};

use collections::{HashTable, Inserted, resolve};
use log::{debug, info};

pub const DEFAULT_BUCKETS: usize = 64;
pub const BUCKETS_ENV: &str = "KVTABLE_BUCKETS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Bucket count of the underlying table, fixed for the store's lifetime
    pub buckets: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
        }
    }
}

impl Config {
    /// Reads `KVTABLE_BUCKETS`, falling back to [`DEFAULT_BUCKETS`] when unset
    pub fn from_env() -> Result<Self, crate::Error> {
        match env::var(BUCKETS_ENV) {
            Ok(raw) => Self::parse_buckets(&raw),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(crate::Error::Config(format!("{BUCKETS_ENV}: {e}"))),
        }
    }

    pub fn parse_buckets(raw: &str) -> Result<Self, crate::Error> {
        raw.trim()
            .parse()
            .map(|buckets| Self { buckets })
            .map_err(|e| crate::Error::Config(format!("{BUCKETS_ENV}={raw:?}: {e}")))
    }
}

/// String store backed by a fixed-size [`HashTable`].
///
/// Every write goes through [`HashTable::insert`]; the method picks the
/// resolver that gives it its meaning.
#[derive(Debug)]
pub struct Store {
    table: HashTable<String, String>,
}

impl Store {
    pub fn new(config: Config) -> Result<Self, crate::Error> {
        let table = HashTable::try_new(config.buckets)?;
        info!(target: "storage", "store ready with {} buckets", config.buckets);
        Ok(Self { table })
    }

    /// Stores `value` under `key`, replacing whatever was there
    pub fn set<S: Into<String>>(&mut self, key: S, value: S) {
        self.table.insert(key.into(), value.into(), resolve::overwrite);
    }

    /// Stores `value` only if `key` is new, returns whether it was
    pub fn set_nx<S: Into<String>>(&mut self, key: S, value: S) -> bool {
        self.table.insert(key.into(), value.into(), resolve::keep) == Inserted::Appended
    }

    /// Appends `value` to the string stored under `key`,
    /// creating it if needed. Returns the new length
    pub fn append<S: Into<String>>(&mut self, key: S, value: S) -> usize {
        let key = key.into();
        let slot = self.table.slot_of(&key);
        let inserted = self.table.insert(key.clone(), value.into(), |mut old, new| {
            old.push_str(&new);
            old
        });
        debug!(target: "storage", "append to slot {slot}: {inserted:?}");
        self.table.get(&key).map_or(0, String::len)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.table.get(key).map(String::as_str)
    }

    /// Removes `key`, handing back the value it held
    pub fn del(&mut self, key: &str) -> Option<String> {
        self.table.remove(key)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    /// All pairs, bucket by bucket
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::with_capacity(self.table.len());
        self.table
            .iterate(|key, value| out.push((key.as_str(), value.as_str())));
        out
    }

    /// Tears the current table down and starts over with an empty one
    /// of the same size. Returns how many values were released
    pub fn clear(&mut self) -> usize {
        let fresh = HashTable::new(self.table.bucket_count());
        let old = std::mem::replace(&mut self.table, fresh);

        let mut released = 0;
        old.destroy(|value| {
            released += 1;
            debug!(target: "storage", "released value of {} bytes", value.len());
        });
        info!(target: "storage", "cleared {released} entries");
        released
    }
}

#[cfg(test)]
mod test {
    use super::{Config, DEFAULT_BUCKETS, Store};
    use crate::Error;

    fn store(buckets: usize) -> Store {
        Store::new(Config { buckets }).unwrap()
    }

    #[test]
    fn config_parsing() {
        assert_eq!(Config::default().buckets, DEFAULT_BUCKETS);
        assert_eq!(Config::parse_buckets(" 12 ").unwrap(), Config { buckets: 12 });
        assert!(matches!(Config::parse_buckets("twelve"), Err(Error::Config(_))));
        assert!(matches!(Config::parse_buckets("-1"), Err(Error::Config(_))));
    }

    #[test]
    fn zero_buckets_is_a_table_error() {
        let config = Config::parse_buckets("0").unwrap();
        assert!(matches!(Store::new(config), Err(Error::Table(_))));
    }

    #[test]
    fn set_get_del() {
        let mut s = store(4);
        s.set("a", "1");
        s.set("b", "2");
        assert_eq!(s.get("a"), Some("1"));

        s.set("a", "3");
        assert_eq!(s.get("a"), Some("3"));
        assert_eq!(s.len(), 2);

        assert_eq!(s.del("a"), Some("3".to_string()));
        assert_eq!(s.del("a"), None);
        assert_eq!(s.get("a"), None);
        assert_eq!(s.entries(), [("b", "2")]);
    }

    #[test]
    fn set_nx_keeps_first_value() {
        let mut s = store(1);
        assert!(s.set_nx("k", "first"));
        assert!(!s.set_nx("k", "second"));
        assert_eq!(s.get("k"), Some("first"));
    }

    #[test]
    fn append_concatenates() {
        let mut s = store(3);
        assert_eq!(s.append("greeting", "hello"), 5);
        assert_eq!(s.append("greeting", ",world"), 11);
        assert_eq!(s.get("greeting"), Some("hello,world"));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn clear_releases_everything() {
        let mut s = store(5);
        for i in 0..12 {
            s.set(format!("k{i}"), format!("v{i}"));
        }
        assert_eq!(s.clear(), 12);
        assert!(s.is_empty());
        assert_eq!(s.bucket_count(), 5);

        s.set("again", "works");
        assert_eq!(s.get("again"), Some("works"));
    }
}
