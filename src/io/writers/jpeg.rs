use jpeg_encoder::{ColorType, Encoder};

use crate::error::{Error, Result};
use crate::types::{ColorMode, Raster, ThumbFormat};

/// Encode a raster as baseline JPEG. Alpha is dropped.
pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>> {
    let cols = u16::try_from(raster.width).map_err(|_| too_large(raster))?;
    let rows = u16::try_from(raster.height).map_err(|_| too_large(raster))?;

    let mut out = Vec::new();
    let encoder = Encoder::new(&mut out, quality.clamp(1, 100));
    let encoded = match raster.mode {
        ColorMode::Gray => encoder.encode(&raster.data, cols, rows, ColorType::Luma),
        ColorMode::Rgb => encoder.encode(&raster.data, cols, rows, ColorType::Rgb),
        ColorMode::Rgba => {
            let rgb: Vec<u8> = raster
                .data
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            encoder.encode(&rgb, cols, rows, ColorType::Rgb)
        }
    };
    encoded.map_err(|e| Error::encode(ThumbFormat::Jpeg, e))?;
    Ok(out)
}

fn too_large(raster: &Raster) -> Error {
    Error::encode(
        ThumbFormat::Jpeg,
        format!("{}x{} exceeds the 65535 pixel limit", raster.width, raster.height),
    )
}
