use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::warn;

/// Failure reading or writing a persisted record.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] io::Error),
    #[error("record {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable key-value storage for session records.
///
/// Durability is best-effort: implementations log failures and carry on, so
/// reads that fail look like missing records.
pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn insert(&mut self, key: &str, value: String);
    fn delete(&mut self, key: &str);
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn insert(&mut self, key: &str, value: String) {
        (**self).insert(key, value)
    }

    fn delete(&mut self, key: &str) {
        (**self).delete(key)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Memory {
    state: HashMap<String, String>,
}

impl Store for Memory {
    fn get(&self, key: &str) -> Option<String> {
        self.state.get(key).cloned()
    }

    fn insert(&mut self, key: &str, value: String) {
        self.state.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) {
        self.state.remove(key);
    }
}

/// Stores each record as `<key>.json` inside a directory.
#[derive(Clone, Debug)]
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Store for Directory {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, "storage error during get operation: {:?}", e);
                None
            }
        }
    }

    fn insert(&mut self, key: &str, value: String) {
        if let Err(e) = fs::write(self.path(key), value) {
            warn!(key, "storage error during insert operation: {:?}", e);
        }
    }

    fn delete(&mut self, key: &str) {
        match fs::remove_file(self.path(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(key, "storage error during delete operation: {:?}", e),
        }
    }
}
