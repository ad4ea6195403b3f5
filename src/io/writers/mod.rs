//! Thumbnail encoders: JPEG through `jpeg-encoder`, TIFF through `tiff`,
//! everything else through the `image` crate.
pub mod jpeg;
pub mod raster;
pub mod tiff;

use tracing::debug;

use crate::error::Result;
use crate::types::{Raster, ThumbFormat};

/// Encode `raster` in `format`. `quality` only applies to JPEG.
pub fn encode_raster(raster: &Raster, format: ThumbFormat, quality: u8) -> Result<Vec<u8>> {
    let bytes = match format {
        ThumbFormat::Jpeg => jpeg::encode_jpeg(raster, quality)?,
        ThumbFormat::Tiff => tiff::encode_tiff(raster)?,
        ThumbFormat::Png | ThumbFormat::Gif | ThumbFormat::Bmp => {
            raster::encode_with_image(raster, format)?
        }
    };
    debug!(
        "Encoded {}x{} {} as {} ({} bytes)",
        raster.width,
        raster.height,
        raster.mode,
        format,
        bytes.len()
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorMode;

    fn solid(mode: ColorMode) -> Raster {
        let channels = mode.channels();
        Raster {
            width: 6,
            height: 4,
            mode,
            data: vec![120u8; 6 * 4 * channels],
        }
    }

    #[test]
    fn every_format_decodes_back() {
        for format in [
            ThumbFormat::Jpeg,
            ThumbFormat::Png,
            ThumbFormat::Gif,
            ThumbFormat::Bmp,
            ThumbFormat::Tiff,
        ] {
            for mode in [ColorMode::Gray, ColorMode::Rgb, ColorMode::Rgba] {
                let bytes = encode_raster(&solid(mode), format, 90).unwrap();
                let expected = image::ImageFormat::from_extension(format.extension()).unwrap();
                assert_eq!(image::guess_format(&bytes).unwrap(), expected, "{format} {mode}");
                let decoded = image::load_from_memory(&bytes).unwrap();
                assert_eq!((decoded.width(), decoded.height()), (6, 4), "{format} {mode}");
            }
        }
    }

    #[test]
    fn jpeg_rejects_oversized_rasters() {
        let raster = Raster {
            width: 70_000,
            height: 1,
            mode: ColorMode::Gray,
            data: vec![0; 70_000],
        };
        assert!(matches!(
            encode_raster(&raster, ThumbFormat::Jpeg, 85),
            Err(crate::Error::Encode { .. })
        ));
    }

    #[test]
    fn mismatched_buffer_is_an_error() {
        let raster = Raster {
            width: 10,
            height: 10,
            mode: ColorMode::Rgb,
            data: vec![0; 5],
        };
        assert!(raster::to_dynamic(raster).is_err());
    }
}
