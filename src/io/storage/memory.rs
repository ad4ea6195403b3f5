use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{Storage, join_url};
use crate::error::{Error, Result};

/// In-process storage, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    base_url: String,
}

impl MemoryStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            files: Mutex::new(BTreeMap::new()),
            base_url: base_url.into(),
        }
    }

    /// Stored names in lexical order.
    pub fn names(&self) -> Vec<String> {
        self.files().keys().cloned().collect()
    }

    /// Place `content` under exactly `name`, replacing anything there.
    pub fn insert(&self, name: &str, content: &[u8]) {
        self.files().insert(name.to_string(), content.to_vec());
    }

    fn files(&self) -> MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.files().contains_key(name))
    }

    fn save(&self, name: &str, content: &[u8]) -> Result<String> {
        let name = self.available_name(name)?;
        self.insert(&name, content);
        Ok(name)
    }

    fn open(&self, name: &str) -> Result<Vec<u8>> {
        self.files().get(name).cloned().ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.files()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound {
                name: name.to_string(),
            })
    }

    fn url(&self, name: &str) -> String {
        join_url(&self.base_url, name)
    }
}
