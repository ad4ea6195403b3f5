use clap::ValueEnum;
use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::processing::crop::CropBox;
use crate::error::Result;
use crate::types::{ColorMode, Raster, TargetSize};

/// Resampling filter used when scaling the cropped region.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    Bilinear,
    CatmullRom,
    /// Antialiasing filter, the default for thumbnails.
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    fn algorithm(self) -> ResizeAlg {
        match self {
            ResizeFilter::Nearest => ResizeAlg::Nearest,
            ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResizeFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

fn pixel_type(mode: ColorMode) -> PixelType {
    match mode {
        ColorMode::Gray => PixelType::U8,
        ColorMode::Rgb => PixelType::U8x3,
        ColorMode::Rgba => PixelType::U8x4,
    }
}

/// Output dimensions for a crop of `crop_width`x`crop_height` resized towards `target`.
///
/// With `upscale` the result is always the target. Without it, a crop smaller than the
/// target is never enlarged: the target box is shrunk to fit within the crop, keeping
/// the target's ratio.
pub fn fit_within(crop_width: u32, crop_height: u32, target: TargetSize, upscale: bool) -> (u32, u32) {
    if upscale || (crop_width >= target.width && crop_height >= target.height) {
        return (target.width, target.height);
    }

    warn!(
        "Source region {}x{} is smaller than target {}; keeping it unenlarged",
        crop_width, crop_height, target
    );
    let (cw, ch) = (crop_width as f64, crop_height as f64);
    let (tw, th) = (target.width as f64, target.height as f64);
    let s = (cw / tw).min(ch / th).min(1.0);
    (
        ((tw * s).round() as u32).max(1),
        ((th * s).round() as u32).max(1),
    )
}

/// Resize an 8-bit raster to exactly `width`x`height`.
pub fn resize_raster(
    raster: &Raster,
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> Result<Raster> {
    resize_region(raster, CropBox::full(raster.width, raster.height), width, height, filter)
}

/// Resize the `crop` window of `raster` to exactly `width`x`height`. The crop is applied
/// by the resizer itself, so the window is never copied out first.
pub fn resize_region(
    raster: &Raster,
    crop: CropBox,
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> Result<Raster> {
    let full = crop.is_full(raster.width, raster.height);
    if full && raster.width == width && raster.height == height {
        debug!("Raster already {}x{}, skipping resize", width, height);
        return Ok(raster.clone());
    }

    let mut resize_options = ResizeOptions::new().resize_alg(filter.algorithm());
    if !full {
        resize_options = resize_options.crop(
            crop.x as f64,
            crop.y as f64,
            crop.width as f64,
            crop.height as f64,
        );
    }
    let mut resizer = Resizer::new();

    let src_image = ImageRef::new(
        raster.width,
        raster.height,
        &raster.data,
        pixel_type(raster.mode),
    )?;
    let mut dst_image = Image::new(width, height, pixel_type(raster.mode));
    resizer.resize(&src_image, &mut dst_image, &resize_options)?;

    debug!(
        "Resized {} raster {}x{} (window {}x{} at {},{}) -> {}x{} ({:?})",
        raster.mode,
        raster.width,
        raster.height,
        crop.width,
        crop.height,
        crop.x,
        crop.y,
        width,
        height,
        filter
    );

    Ok(Raster {
        width,
        height,
        mode: raster.mode,
        data: dst_image.into_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, mode: ColorMode) -> Raster {
        let channels = mode.channels();
        let mut data = Vec::with_capacity(width as usize * height as usize * channels);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    data.push(((x + y) as usize * 7 + c * 31) as u8);
                }
            }
        }
        Raster { width, height, mode, data }
    }

    #[test]
    fn resizes_every_mode_to_exact_size() {
        for mode in [ColorMode::Gray, ColorMode::Rgb, ColorMode::Rgba] {
            let src = gradient(40, 20, mode);
            let out = resize_raster(&src, 10, 5, ResizeFilter::default()).unwrap();
            assert_eq!((out.width, out.height), (10, 5));
            assert_eq!(out.data.len(), 10 * 5 * mode.channels());
            assert_eq!(out.mode, mode);
        }
    }

    #[test]
    fn same_size_is_a_copy() {
        let src = gradient(8, 8, ColorMode::Rgb);
        let out = resize_raster(&src, 8, 8, ResizeFilter::Nearest).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn region_resize_samples_only_the_window() {
        // 12x8 gray: a bright 6x4 window at (4, 2), dark elsewhere
        let (w, h) = (12u32, 8u32);
        let data = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .map(|(x, y)| if (4..10).contains(&x) && (2..6).contains(&y) { 200 } else { 0 })
            .collect();
        let src = Raster {
            width: w,
            height: h,
            mode: ColorMode::Gray,
            data,
        };
        let crop = CropBox {
            x: 4,
            y: 2,
            width: 6,
            height: 4,
        };
        let out = resize_region(&src, crop, 3, 2, ResizeFilter::Nearest).unwrap();
        assert_eq!((out.width, out.height), (3, 2));
        assert!(out.data.iter().all(|&v| v == 200), "{:?}", out.data);
    }

    #[test]
    fn upscale_policy() {
        let target = TargetSize::new(100, 50).unwrap();
        assert_eq!(fit_within(40, 40, target, true), (100, 50));
        assert_eq!(fit_within(400, 400, target, false), (100, 50));
        assert_eq!(fit_within(40, 20, target, false), (40, 20));
        assert_eq!(fit_within(30, 30, target, false), (30, 15));
    }
}
