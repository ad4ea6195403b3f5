use tracing::debug;

use crate::types::TargetSize;

/// Source-space rectangle kept before resizing.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CropBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropBox {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn is_full(&self, width: u32, height: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == width && self.height == height
    }
}

/// Compute the centered crop that gives the source the target's aspect ratio.
///
/// Square targets take the largest centered square. Otherwise the ratios are compared
/// by cross-multiplication: equal ratios keep the whole image, a wider target trims
/// height to `ceil(w / ratio)`, a narrower one trims width to `ceil(h * ratio)`.
/// Offsets are `floor((source - crop) / 2)`.
pub fn plan_crop(source_width: u32, source_height: u32, target: TargetSize) -> CropBox {
    let (sw, sh) = (source_width as u64, source_height as u64);
    let (tw, th) = (target.width as u64, target.height as u64);

    let (crop_w, crop_h) = if target.is_square() {
        let side = sw.min(sh);
        (side, side)
    } else {
        let target_cross = tw * sh;
        let source_cross = th * sw;
        if target_cross == source_cross {
            (sw, sh)
        } else if target_cross > source_cross {
            // target wider: ceil(sw / (tw / th))
            (sw, (sw * th).div_ceil(tw).clamp(1, sh))
        } else {
            // target narrower: ceil(sh * (tw / th))
            ((sh * tw).div_ceil(th).clamp(1, sw), sh)
        }
    };

    let crop = CropBox {
        x: ((sw - crop_w) / 2) as u32,
        y: ((sh - crop_h) / 2) as u32,
        width: crop_w as u32,
        height: crop_h as u32,
    };
    debug!(
        "Crop plan for {}x{} -> {}: {}x{} at ({}, {})",
        source_width, source_height, target, crop.width, crop.height, crop.x, crop.y
    );
    crop
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: u32, h: u32) -> TargetSize {
        TargetSize::new(w, h).unwrap()
    }

    #[test]
    fn square_target_takes_centered_square() {
        let crop = plan_crop(400, 200, size(100, 100));
        assert_eq!(crop, CropBox { x: 100, y: 0, width: 200, height: 200 });

        let crop = plan_crop(200, 400, size(64, 64));
        assert_eq!(crop, CropBox { x: 0, y: 100, width: 200, height: 200 });
    }

    #[test]
    fn odd_difference_square_stays_square() {
        let crop = plan_crop(401, 200, size(50, 50));
        assert_eq!(crop, CropBox { x: 100, y: 0, width: 200, height: 200 });
    }

    #[test]
    fn equal_ratio_keeps_whole_image() {
        let crop = plan_crop(400, 200, size(100, 50));
        assert!(crop.is_full(400, 200));
    }

    #[test]
    fn narrower_target_trims_width() {
        let crop = plan_crop(400, 200, size(50, 100));
        assert_eq!(crop, CropBox { x: 150, y: 0, width: 100, height: 200 });
    }

    #[test]
    fn wider_target_trims_height() {
        // ratio 3.0 against 2.0: ceil(400 / 3) = 134
        let crop = plan_crop(400, 200, size(300, 100));
        assert_eq!(crop, CropBox { x: 0, y: 33, width: 400, height: 134 });
    }

    #[test]
    fn ceiling_rounds_up_fractional_crops() {
        // ceil(333 * 0.75) = 250
        let crop = plan_crop(1000, 333, size(300, 400));
        assert_eq!(crop.width, 250);
        assert_eq!(crop.height, 333);
        assert_eq!(crop.x, 375);
    }

    #[test]
    fn crop_offsets_are_centered() {
        for (sw, sh, t) in [(640, 480, size(200, 120)), (480, 640, size(120, 200)), (999, 311, size(50, 50))] {
            let crop = plan_crop(sw, sh, t);
            let right = sw - crop.x - crop.width;
            let bottom = sh - crop.y - crop.height;
            assert!(right.abs_diff(crop.x) <= 1, "{crop:?}");
            assert!(bottom.abs_diff(crop.y) <= 1, "{crop:?}");
        }
    }

    #[test]
    fn tiny_sources_never_collapse() {
        let crop = plan_crop(1, 1, size(300, 100));
        assert_eq!(crop, CropBox::full(1, 1));
        let crop = plan_crop(3, 1, size(1, 300));
        assert_eq!((crop.width, crop.height), (1, 1));
    }
}
