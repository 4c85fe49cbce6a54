use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use imageproc::filter::gaussian_blur_f32;

/// Fixed linear downscale applied to every input before processing.
pub const DOWNSCALE_FACTOR: f32 = 0.6;

/// Sigma of the fixed noise-suppression blur.
pub const BLUR_SIGMA: f32 = 1.0;

/// CLAHE tile grid (8x8 tiles) and clip limit.
pub const CLAHE_GRID: u32 = 8;
pub const CLAHE_CLIP_LIMIT: f32 = 2.0;

/// Resize the input to `factor` of its linear dimensions, preserving aspect
/// ratio. Bounds the cost of everything downstream.
pub fn downscale(img: &DynamicImage, factor: f32) -> DynamicImage {
    let width = ((img.width() as f32 * factor).round() as u32).max(1);
    let height = ((img.height() as f32 * factor).round() as u32).max(1);
    img.resize_exact(width, height, FilterType::Triangle)
}

/// Reduce to single-channel intensity using the standard luma weighting.
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Small fixed-kernel Gaussian smoothing pass.
pub fn blur(img: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(img, sigma)
}

/// Contrast-limited adaptive histogram equalization.
///
/// The image is partitioned into a `grid` x `grid` tile grid; each tile gets
/// its own clipped-histogram equalization lookup table, and per-pixel output
/// is bilinearly interpolated between the four nearest tile tables. The clip
/// limit follows the usual convention: `clip_limit * tile_area / 256` counts
/// per bin, with the excess redistributed uniformly.
pub fn clahe(img: &GrayImage, grid: u32, clip_limit: f32) -> GrayImage {
    let (width, height) = img.dimensions();
    if width < grid || height < grid {
        // Too small to tile meaningfully; leave the image untouched.
        return img.clone();
    }

    let grid = grid as usize;
    let mut luts = vec![[0u8; 256]; grid * grid];

    for ty in 0..grid {
        for tx in 0..grid {
            // Even partition: tile (tx, ty) covers [x0, x1) x [y0, y1).
            let x0 = (tx as u32 * width) / grid as u32;
            let x1 = ((tx as u32 + 1) * width) / grid as u32;
            let y0 = (ty as u32 * height) / grid as u32;
            let y1 = ((ty as u32 + 1) * height) / grid as u32;
            let area = ((x1 - x0) * (y1 - y0)) as u32;

            let mut hist = [0u32; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    hist[img.get_pixel(x, y)[0] as usize] += 1;
                }
            }

            // Clip the histogram and redistribute the excess uniformly.
            let clip = ((clip_limit * area as f32 / 256.0) as u32).max(1);
            let mut excess = 0u32;
            for bin in hist.iter_mut() {
                if *bin > clip {
                    excess += *bin - clip;
                    *bin = clip;
                }
            }
            let bonus = excess / 256;
            let remainder = (excess % 256) as usize;
            for (i, bin) in hist.iter_mut().enumerate() {
                *bin += bonus + u32::from(i < remainder);
            }

            // Cumulative distribution -> lookup table.
            let lut = &mut luts[ty * grid + tx];
            let scale = 255.0 / area as f32;
            let mut cdf = 0u32;
            for (value, bin) in hist.iter().enumerate() {
                cdf += bin;
                lut[value] = (cdf as f32 * scale).round().min(255.0) as u8;
            }
        }
    }

    let tile_w = width as f32 / grid as f32;
    let tile_h = height as f32 / grid as f32;
    let max_tile = (grid - 1) as i64;

    GrayImage::from_fn(width, height, |x, y| {
        let value = img.get_pixel(x, y)[0] as usize;

        // Position in tile-center coordinates; border pixels clamp to the
        // outermost tiles (replicated borders).
        let fx = (x as f32 + 0.5) / tile_w - 0.5;
        let fy = (y as f32 + 0.5) / tile_h - 0.5;
        let ix = fx.floor() as i64;
        let iy = fy.floor() as i64;
        let wx = fx - ix as f32;
        let wy = fy - iy as f32;

        let x0 = ix.clamp(0, max_tile) as usize;
        let x1 = (ix + 1).clamp(0, max_tile) as usize;
        let y0 = iy.clamp(0, max_tile) as usize;
        let y1 = (iy + 1).clamp(0, max_tile) as usize;

        let top = luts[y0 * grid + x0][value] as f32 * (1.0 - wx)
            + luts[y0 * grid + x1][value] as f32 * wx;
        let bottom = luts[y1 * grid + x0][value] as f32 * (1.0 - wx)
            + luts[y1 * grid + x1][value] as f32 * wx;
        let blended = top * (1.0 - wy) + bottom * wy;

        image::Luma([blended.round().clamp(0.0, 255.0) as u8])
    })
}
