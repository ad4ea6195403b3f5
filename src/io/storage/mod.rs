//! Storage backends that originals and their thumbnails are persisted to.
//!
//! A backend owns naming: `save` may store under a different name than requested
//! when the requested one is taken, and returns the name it actually used.
pub mod fs;
pub mod memory;

pub use fs::FileSystemStorage;
pub use memory::MemoryStorage;

use crate::error::Result;
use crate::naming::with_base_suffix;

pub trait Storage {
    fn exists(&self, name: &str) -> Result<bool>;

    /// `name` if it is free, otherwise `name` with `_` appended to the basename
    /// until it is (`photo.jpg` -> `photo_.jpg` -> `photo__.jpg`).
    fn available_name(&self, name: &str) -> Result<String> {
        let mut candidate = name.to_string();
        while self.exists(&candidate)? {
            candidate = with_base_suffix(&candidate, "_");
        }
        Ok(candidate)
    }

    /// Store `content` under an available name derived from `name` and return that name.
    fn save(&self, name: &str, content: &[u8]) -> Result<String>;

    fn open(&self, name: &str) -> Result<Vec<u8>>;

    /// Remove `name`. Fails with `Error::NotFound` if it does not exist.
    fn delete(&self, name: &str) -> Result<()>;

    fn url(&self, name: &str) -> String;
}

pub(crate) fn join_url(base_url: &str, name: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        name.replace('\\', "/").trim_start_matches('/')
    )
}
