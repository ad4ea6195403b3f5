use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage, RgbaImage};

use crate::error::{Error, Result};
use crate::types::{ColorMode, Raster, ThumbFormat};

/// Wrap a raster in an `image` buffer without copying pixel data.
pub fn to_dynamic(raster: Raster) -> Result<DynamicImage> {
    let (w, h) = (raster.width, raster.height);
    let image = match raster.mode {
        ColorMode::Gray => GrayImage::from_raw(w, h, raster.data).map(DynamicImage::ImageLuma8),
        ColorMode::Rgb => RgbImage::from_raw(w, h, raster.data).map(DynamicImage::ImageRgb8),
        ColorMode::Rgba => RgbaImage::from_raw(w, h, raster.data).map(DynamicImage::ImageRgba8),
    };
    image.ok_or_else(|| Error::External(format!("pixel buffer does not match {}x{}", w, h)))
}

/// Encode through the `image` crate encoders (PNG, GIF, BMP).
pub fn encode_with_image(raster: &Raster, format: ThumbFormat) -> Result<Vec<u8>> {
    let image_format = match format {
        ThumbFormat::Png => ImageFormat::Png,
        ThumbFormat::Gif => ImageFormat::Gif,
        ThumbFormat::Bmp => ImageFormat::Bmp,
        ThumbFormat::Jpeg | ThumbFormat::Tiff => {
            return Err(Error::encode(format, "handled by a dedicated writer"));
        }
    };

    let mut image = to_dynamic(raster.clone())?;
    // the GIF encoder only takes RGB(A) input
    if format == ThumbFormat::Gif && raster.mode == ColorMode::Gray {
        image = DynamicImage::ImageRgb8(image.to_rgb8());
    }

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, image_format)
        .map_err(|e| Error::encode(format, e))?;
    Ok(buffer.into_inner())
}
