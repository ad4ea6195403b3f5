use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{Storage, join_url};
use crate::error::{Error, Result};

/// Stores files below `root`, handing out URLs below `base_url`.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root: PathBuf,
    base_url: String,
}

impl FileSystemStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a storage name to a path, refusing names that leave `root`.
    pub fn path(&self, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name);
        let escapes = name.is_empty()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(Error::InvalidArgument {
                arg: "name",
                value: name.to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl Storage for FileSystemStorage {
    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.path(name)?.exists())
    }

    fn save(&self, name: &str, content: &[u8]) -> Result<String> {
        let mut name = self.available_name(name)?;
        let mut path = self.path(&name)?;
        let dir = path.parent().unwrap_or(&self.root).to_path_buf();
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;

        // another writer may claim the name between the check and the rename
        loop {
            match tmp.persist_noclobber(&path) {
                Ok(_) => break,
                Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                    debug!("{} was taken while saving, retrying", name);
                    tmp = e.file;
                    name = self.available_name(&name)?;
                    path = self.path(&name)?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!("Saved {} ({} bytes)", path.display(), content.len());
        Ok(name)
    }

    fn open(&self, name: &str) -> Result<Vec<u8>> {
        fs::read(self.path(name)?).map_err(|e| not_found_or_io(name, e))
    }

    fn delete(&self, name: &str) -> Result<()> {
        fs::remove_file(self.path(name)?).map_err(|e| not_found_or_io(name, e))?;
        debug!("Deleted {}", name);
        Ok(())
    }

    fn url(&self, name: &str) -> String {
        join_url(&self.base_url, name)
    }
}

fn not_found_or_io(name: &str, e: std::io::Error) -> Error {
    if e.kind() == ErrorKind::NotFound {
        Error::NotFound {
            name: name.to_string(),
        }
    } else {
        Error::Io(e)
    }
}
