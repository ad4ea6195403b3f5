//! Shared types used across thumbkit.
//! Includes `ThumbFormat`, `TargetSize`, `ColorMode` and the decoded `Raster` buffer.
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Encodings a thumbnail can be written in.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbFormat {
    #[value(alias = "jpg")]
    Jpeg,
    Png,
    Gif,
    Bmp,
    #[value(alias = "tif")]
    Tiff,
}

impl ThumbFormat {
    /// Resolve a format name or file extension, case-insensitively.
    /// `jpg` is an alias of `jpeg`, `tif` of `tiff`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ThumbFormat::Jpeg),
            "png" => Ok(ThumbFormat::Png),
            "gif" => Ok(ThumbFormat::Gif),
            "bmp" => Ok(ThumbFormat::Bmp),
            "tif" | "tiff" => Ok(ThumbFormat::Tiff),
            _ => Err(Error::UnsupportedFormat {
                format: name.to_string(),
            }),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ThumbFormat::Jpeg => "jpg",
            ThumbFormat::Png => "png",
            ThumbFormat::Gif => "gif",
            ThumbFormat::Bmp => "bmp",
            ThumbFormat::Tiff => "tiff",
        }
    }
}

impl fmt::Display for ThumbFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ThumbFormat::Jpeg => "JPEG",
            ThumbFormat::Png => "PNG",
            ThumbFormat::Gif => "GIF",
            ThumbFormat::Bmp => "BMP",
            ThumbFormat::Tiff => "TIFF",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ThumbFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ThumbFormat::from_name(s)
    }
}

/// Box a thumbnail is cropped and resized into. Both sides are non-zero.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "SizeRepr", into = "String")]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::ZeroSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Width over height.
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for TargetSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSize {
            size: s.to_string(),
        };
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
        TargetSize::new(width, height)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeRepr {
    Text(String),
    Pair(u32, u32),
}

impl TryFrom<SizeRepr> for TargetSize {
    type Error = Error;

    fn try_from(repr: SizeRepr) -> Result<Self> {
        match repr {
            SizeRepr::Text(s) => s.parse(),
            SizeRepr::Pair(w, h) => TargetSize::new(w, h),
        }
    }
}

impl From<TargetSize> for String {
    fn from(size: TargetSize) -> Self {
        size.to_string()
    }
}

/// Pixel layouts kept as-is by the generator; every other decoded layout is converted to `Rgb`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ColorMode {
    Gray,
    Rgb,
    Rgba,
}

impl ColorMode {
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Gray => 1,
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Gray => write!(f, "L"),
            ColorMode::Rgb => write!(f, "RGB"),
            ColorMode::Rgba => write!(f, "RGBA"),
        }
    }
}

/// Tightly packed 8-bit pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub mode: ColorMode,
    pub data: Vec<u8>,
}

impl Raster {
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.mode.channels()
    }
}
