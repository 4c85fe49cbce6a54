#![allow(dead_code)]

use image::{DynamicImage, GrayImage, Luma};
use imageproc::drawing::draw_filled_circle_mut;
use platecount::PlateParams;

/// Intensity of the synthetic plate disk.
pub const PLATE_GRAY: u8 = 60;

/// Square test image: a uniform gray plate disk on a black background, with
/// filled circular spots drawn on top. Coordinates are in the original
/// (pre-downscale) image; the analyzer resizes to 60% before masking.
pub fn plate_image(
    size: u32,
    plate_radius: i32,
    spots: &[(i32, i32, i32)],
    spot_value: u8,
) -> DynamicImage {
    let mut img = GrayImage::new(size, size);
    let c = (size / 2) as i32;
    draw_filled_circle_mut(&mut img, (c, c), plate_radius, Luma([PLATE_GRAY]));
    for &(x, y, r) in spots {
        draw_filled_circle_mut(&mut img, (x, y), r, Luma([spot_value]));
    }
    DynamicImage::ImageLuma8(img)
}

/// `n` spot centers evenly spaced on a circle of `ring_radius` around the
/// image midpoint, each with the given spot radius.
pub fn ring_spots(size: u32, ring_radius: f32, n: usize, spot_radius: i32) -> Vec<(i32, i32, i32)> {
    let c = size as f32 / 2.0;
    (0..n)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / n as f32;
            (
                (c + ring_radius * angle.cos()).round() as i32,
                (c + ring_radius * angle.sin()).round() as i32,
                spot_radius,
            )
        })
        .collect()
}

/// Tonal inversion of the whole frame.
pub fn inverted(img: &DynamicImage) -> DynamicImage {
    let mut gray = img.to_luma8();
    for p in gray.pixels_mut() {
        p[0] = 255 - p[0];
    }
    DynamicImage::ImageLuma8(gray)
}

/// Baseline parameters for the synthetic scenarios. ROI radii here are in
/// working-image pixels: an 800 px input becomes 480 px, centered at 240.
pub fn test_params() -> PlateParams {
    PlateParams {
        roi_radius: 200,
        brightness_threshold: 128,
        min_area: 10.0,
        max_area: 3000.0,
        target_is_light: true,
        enhance_contrast: false,
    }
}
