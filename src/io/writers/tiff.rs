use std::io::Cursor;

use tiff::encoder::{TiffEncoder, colortype};

use crate::error::{Error, Result};
use crate::types::{ColorMode, Raster, ThumbFormat};

pub fn encode_tiff(raster: &Raster) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut encoder =
            TiffEncoder::new(&mut cursor).map_err(|e| Error::encode(ThumbFormat::Tiff, e))?;
        let (cols, rows) = (raster.width, raster.height);
        let written = match raster.mode {
            ColorMode::Gray => encoder.write_image::<colortype::Gray8>(cols, rows, &raster.data),
            ColorMode::Rgb => encoder.write_image::<colortype::RGB8>(cols, rows, &raster.data),
            ColorMode::Rgba => encoder.write_image::<colortype::RGBA8>(cols, rows, &raster.data),
        };
        written.map_err(|e| Error::encode(ThumbFormat::Tiff, e))?;
    }
    Ok(cursor.into_inner())
}
