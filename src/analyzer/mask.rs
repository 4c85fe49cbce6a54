use image::{GrayImage, Luma};

/// Build a single-channel mask: a filled disk of `radius` pixels centered at
/// the image midpoint, 255 inside and 0 outside.
pub fn disk_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let cx = (width / 2) as i64;
    let cy = (height / 2) as i64;
    let r2 = (radius as i64) * (radius as i64);
    GrayImage::from_fn(width, height, |x, y| {
        let dx = x as i64 - cx;
        let dy = y as i64 - cy;
        if dx * dx + dy * dy <= r2 {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Zero every pixel that falls outside the mask.
///
/// Both images must share dimensions; the analyzer always builds the mask
/// from the working image, so this holds by construction.
pub fn apply(img: &mut GrayImage, mask: &GrayImage) {
    debug_assert_eq!(img.dimensions(), mask.dimensions());
    for (pixel, mask_pixel) in img.pixels_mut().zip(mask.pixels()) {
        if mask_pixel[0] == 0 {
            pixel[0] = 0;
        }
    }
}

/// Midpoint the mask is centered on, for drawing the ROI boundary.
pub fn center(width: u32, height: u32) -> (i32, i32) {
    ((width / 2) as i32, (height / 2) as i32)
}
