use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::processing::resize::ResizeFilter;
use crate::error::{Error, Result};
use crate::types::TargetSize;

pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Per-thumbnail rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailOptions {
    /// JPEG quality, 1-100
    pub quality: u8,
    pub filter: ResizeFilter,
    /// If false, a source smaller than the target is never enlarged
    pub upscale: bool,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
            filter: ResizeFilter::Lanczos3,
            upscale: true,
        }
    }
}

/// Thumbnail settings suitable for config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    pub sizes: Vec<TargetSize>,
    pub options: ThumbnailOptions,
    /// Prefix for URLs handed out by filesystem storage
    pub base_url: String,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            sizes: vec![
                TargetSize {
                    width: 125,
                    height: 125,
                },
                TargetSize {
                    width: 300,
                    height: 200,
                },
            ],
            options: ThumbnailOptions::default(),
            base_url: "/media/".to_string(),
        }
    }
}

impl ThumbnailConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ThumbnailConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!(
            "Loaded config from {:?}: {} size(s)",
            path,
            config.sizes.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.options.quality) {
            return Err(Error::InvalidArgument {
                arg: "quality",
                value: self.options.quality.to_string(),
            });
        }
        if let Some(size) = self.sizes.iter().find(|s| s.width == 0 || s.height == 0) {
            return Err(Error::ZeroSize {
                width: size.width,
                height: size.height,
            });
        }
        Ok(())
    }
}
