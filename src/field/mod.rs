//! Image field with fixed-size thumbnail variants.
//!
//! An [`ImageWithThumbsField`] lists the sizes to keep. Binding it to a [`Storage`]
//! gives a [`FieldFile`] that saves an original together with one thumbnail per size,
//! hands out their URLs, and removes them all on delete.
//!
//! For an original stored as `photo.jpg` with sizes `125x125` and `300x200`:
//!
//! ```text
//! photo.jpg          (original)
//! photo.125x125.jpg
//! photo.300x200.jpg
//! ```
//!
//! If the storage renames the original (say to `photo_.jpg`), the thumbnails follow the
//! stored name. A thumbnail name that is already taken while the original's was free is
//! an error (`Error::NamingCollision`). Content that cannot be thumbnailed is rejected
//! before anything is written.
use tracing::{debug, info, warn};

use crate::core::params::{ThumbnailConfig, ThumbnailOptions};
use crate::core::processing::thumbnail::{decode_source, render_thumbnail};
use crate::error::{Error, Result};
use crate::io::storage::Storage;
use crate::io::writers::encode_raster;
use crate::naming::{extension_of, thumbnail_name, thumbnail_url};
use crate::types::{TargetSize, ThumbFormat};

/// Sizes and rendering options of an image-with-thumbnails field.
/// With no sizes it behaves like a plain image field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageWithThumbsField {
    pub sizes: Vec<TargetSize>,
    pub options: ThumbnailOptions,
}

impl ImageWithThumbsField {
    pub fn new(sizes: Vec<TargetSize>) -> Self {
        Self {
            sizes,
            options: ThumbnailOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ThumbnailOptions) -> Self {
        self.options = options;
        self
    }

    pub fn from_config(config: &ThumbnailConfig) -> Self {
        Self {
            sizes: config.sizes.clone(),
            options: config.options,
        }
    }

    /// Attach the field to `storage`, optionally pointing at an already stored original.
    pub fn bind<'a, S: Storage + ?Sized>(
        &'a self,
        storage: &'a S,
        name: Option<String>,
    ) -> FieldFile<'a, S> {
        FieldFile {
            field: self,
            storage,
            name,
        }
    }
}

/// A stored original (or the absence of one) plus its thumbnail variants.
pub struct FieldFile<'a, S: Storage + ?Sized> {
    field: &'a ImageWithThumbsField,
    storage: &'a S,
    name: Option<String>,
}

impl<'a, S: Storage + ?Sized> FieldFile<'a, S> {
    /// Stored name of the original, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn url(&self) -> Option<String> {
        self.name.as_deref().map(|name| self.storage.url(name))
    }

    /// URL of the `size` variant; `None` without an original or for a size the field
    /// does not keep.
    pub fn thumbnail_url(&self, size: TargetSize) -> Result<Option<String>> {
        if !self.field.sizes.contains(&size) {
            return Ok(None);
        }
        match self.url() {
            Some(url) => thumbnail_url(&url, size).map(Some),
            None => Ok(None),
        }
    }

    /// `(size, url)` for every configured size; empty without an original.
    pub fn thumbnail_urls(&self) -> Result<Vec<(TargetSize, String)>> {
        let Some(url) = self.url() else {
            return Ok(Vec::new());
        };
        self.field
            .sizes
            .iter()
            .map(|&size| Ok((size, thumbnail_url(&url, size)?)))
            .collect()
    }

    /// Storage names of every thumbnail variant; empty without an original.
    pub fn thumbnail_names(&self) -> Result<Vec<String>> {
        let Some(name) = self.name.as_deref() else {
            return Ok(Vec::new());
        };
        self.field
            .sizes
            .iter()
            .map(|&size| thumbnail_name(name, size))
            .collect()
    }

    /// Save `content` as the original under `name` (or the name storage picks instead),
    /// then save one thumbnail per size in the format named by the extension. Returns the
    /// stored original name.
    ///
    /// Every thumbnail is rendered before the original is stored, so undecodable content
    /// or an unsupported extension leaves storage untouched. If storing a thumbnail fails
    /// for any reason but a naming collision, the original and the thumbnails written so
    /// far are removed again.
    pub fn save(&mut self, name: &str, content: &[u8]) -> Result<String> {
        let variants = if self.field.sizes.is_empty() {
            Vec::new()
        } else {
            let format = self.thumbnail_format(name)?;
            self.render_variants(content, format)?
        };

        let stored = self.storage.save(name, content)?;
        info!("Stored original {} as {}", name, stored);
        self.name = Some(stored.clone());

        let mut written = Vec::with_capacity(variants.len());
        for (size, bytes) in &variants {
            match self.store_variant(&stored, *size, bytes) {
                Ok(thumb) => written.push(thumb),
                Err(e @ Error::NamingCollision { .. }) => return Err(e),
                Err(e) => {
                    warn!("Storing thumbnails of {} failed, removing it: {}", stored, e);
                    self.discard(&stored, &written);
                    return Err(e);
                }
            }
        }
        Ok(stored)
    }

    /// Rebuild every thumbnail from the stored original, replacing existing variants.
    pub fn regenerate(&self) -> Result<Vec<String>> {
        let stored = self.name.as_deref().ok_or_else(|| Error::InvalidArgument {
            arg: "name",
            value: "<no file>".to_string(),
        })?;
        let content = self.storage.open(stored)?;
        let format = self.thumbnail_format(stored)?;
        let variants = self.render_variants(&content, format)?;

        let mut written = Vec::with_capacity(variants.len());
        for (size, bytes) in &variants {
            let thumb = thumbnail_name(stored, *size)?;
            if self.storage.exists(&thumb)? {
                self.storage.delete(&thumb)?;
            }
            written.push(self.store_variant(stored, *size, bytes)?);
        }
        info!("Regenerated {} thumbnail(s) for {}", written.len(), stored);
        Ok(written)
    }

    /// Delete the original, then every thumbnail on a best-effort basis.
    pub fn delete(&mut self) -> Result<()> {
        let Some(name) = self.name.take() else {
            return Ok(());
        };
        self.storage.delete(&name)?;

        for &size in &self.field.sizes {
            let Ok(thumb) = thumbnail_name(&name, size) else {
                continue;
            };
            if let Err(e) = self.storage.delete(&thumb) {
                debug!("Ignoring failure to delete {}: {}", thumb, e);
            }
        }
        info!("Deleted {} and its thumbnails", name);
        Ok(())
    }

    fn thumbnail_format(&self, stored: &str) -> Result<ThumbFormat> {
        let ext = extension_of(stored).ok_or_else(|| Error::MissingExtension {
            name: stored.to_string(),
        })?;
        ThumbFormat::from_name(ext)
    }

    /// Decode `content` once and encode one thumbnail per configured size.
    fn render_variants(
        &self,
        content: &[u8],
        format: ThumbFormat,
    ) -> Result<Vec<(TargetSize, Vec<u8>)>> {
        let source = decode_source(content)?;
        self.field
            .sizes
            .iter()
            .map(|&size| {
                let thumb = render_thumbnail(&source, size, &self.field.options)?;
                Ok((size, encode_raster(&thumb, format, self.field.options.quality)?))
            })
            .collect()
    }

    fn store_variant(&self, stored: &str, size: TargetSize, bytes: &[u8]) -> Result<String> {
        let thumb = thumbnail_name(stored, size)?;
        let saved = self.storage.save(&thumb, bytes)?;
        if saved != thumb {
            warn!("Thumbnail name {} was taken, storage used {}", thumb, saved);
            if let Err(e) = self.storage.delete(&saved) {
                debug!("Could not remove misnamed thumbnail {}: {}", saved, e);
            }
            return Err(Error::NamingCollision { name: thumb });
        }
        debug!("Stored {} thumbnail {}", size, thumb);
        Ok(thumb)
    }

    /// Best-effort removal of a half-saved original and the thumbnails written for it.
    fn discard(&mut self, stored: &str, thumbs: &[String]) {
        for name in thumbs.iter().map(String::as_str).chain(std::iter::once(stored)) {
            if let Err(e) = self.storage.delete(name) {
                debug!("Could not remove {}: {}", name, e);
            }
        }
        self.name = None;
    }
}
