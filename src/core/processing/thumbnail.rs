use image::DynamicImage;
use tracing::debug;

use crate::core::params::ThumbnailOptions;
use crate::core::processing::crop::plan_crop;
use crate::core::processing::resize::{fit_within, resize_region};
use crate::error::{Error, Result};
use crate::io::writers::encode_raster;
use crate::types::{ColorMode, Raster, TargetSize, ThumbFormat};

/// Generate a crop-to-fit thumbnail of `source` and encode it as `format`.
///
/// `format` is a format name or file extension (`"jpg"`, `"PNG"`, ...). Options are the
/// defaults: Lanczos3 resampling, JPEG quality 85, output exactly `size`.
pub fn generate_thumbnail(source: &[u8], size: TargetSize, format: &str) -> Result<Vec<u8>> {
    let format = ThumbFormat::from_name(format)?;
    generate_thumbnail_with_options(source, size, format, &ThumbnailOptions::default())
}

pub fn generate_thumbnail_with_options(
    source: &[u8],
    size: TargetSize,
    format: ThumbFormat,
    options: &ThumbnailOptions,
) -> Result<Vec<u8>> {
    let raster = decode_source(source)?;
    let thumb = render_thumbnail(&raster, size, options)?;
    encode_raster(&thumb, format, options.quality)
}

/// Decode image bytes into an 8-bit raster, converting anything that is not
/// grayscale, RGB or RGBA to RGB.
pub fn decode_source(source: &[u8]) -> Result<Raster> {
    let image = image::load_from_memory(source).map_err(Error::Decode)?;
    Ok(normalize(image))
}

fn normalize(image: DynamicImage) -> Raster {
    let (width, height) = (image.width(), image.height());
    match image {
        DynamicImage::ImageLuma8(buf) => Raster {
            width,
            height,
            mode: ColorMode::Gray,
            data: buf.into_raw(),
        },
        DynamicImage::ImageRgb8(buf) => Raster {
            width,
            height,
            mode: ColorMode::Rgb,
            data: buf.into_raw(),
        },
        DynamicImage::ImageRgba8(buf) => Raster {
            width,
            height,
            mode: ColorMode::Rgba,
            data: buf.into_raw(),
        },
        other => {
            debug!("Converting {:?} source to RGB", other.color());
            Raster {
                width,
                height,
                mode: ColorMode::Rgb,
                data: other.to_rgb8().into_raw(),
            }
        }
    }
}

/// Crop `raster` to the target ratio and resize it.
pub fn render_thumbnail(
    raster: &Raster,
    size: TargetSize,
    options: &ThumbnailOptions,
) -> Result<Raster> {
    let crop = plan_crop(raster.width, raster.height, size);
    let (out_w, out_h) = fit_within(crop.width, crop.height, size, options.upscale);

    let thumb = resize_region(raster, crop, out_w, out_h, options.filter)?;
    debug!(
        "Thumbnail {} from {}x{} source: {}x{}",
        size, raster.width, raster.height, thumb.width, thumb.height
    );
    Ok(thumb)
}
