use image::{GrayImage, Luma};

/// Compare every pixel against `threshold`, producing a 0/255 binary image.
///
/// With `target_is_light` set, pixels at or above the threshold become
/// foreground; otherwise pixels at or below it do. The same optical setup can
/// yield either dark colonies on a light plate or light colonies on a dark
/// plate, and getting the polarity wrong silently inverts the whole count.
pub fn binarize(gray: &GrayImage, threshold: u8, target_is_light: bool) -> GrayImage {
    let mut out = GrayImage::new(gray.width(), gray.height());
    for (src, dst) in gray.pixels().zip(out.pixels_mut()) {
        let foreground = if target_is_light {
            src[0] >= threshold
        } else {
            src[0] <= threshold
        };
        *dst = Luma([if foreground { 255 } else { 0 }]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> GrayImage {
        GrayImage::from_fn(16, 1, |x, _| Luma([(x * 16) as u8]))
    }

    #[test]
    fn light_polarity_keeps_bright_pixels() {
        let binary = binarize(&gradient(), 128, true);
        assert_eq!(binary.get_pixel(0, 0)[0], 0);
        assert_eq!(binary.get_pixel(15, 0)[0], 255);
        // Exactly on the threshold counts as foreground.
        assert_eq!(binary.get_pixel(8, 0)[0], 255);
    }

    #[test]
    fn dark_polarity_keeps_dark_pixels() {
        let binary = binarize(&gradient(), 128, false);
        assert_eq!(binary.get_pixel(0, 0)[0], 255);
        assert_eq!(binary.get_pixel(15, 0)[0], 0);
        assert_eq!(binary.get_pixel(8, 0)[0], 255);
    }

    #[test]
    fn polarities_partition_the_image_at_the_threshold() {
        let img = gradient();
        let light = binarize(&img, 100, true);
        let dark = binarize(&img, 100, false);
        for (x, _, p) in img.enumerate_pixels() {
            let in_light = light.get_pixel(x, 0)[0] == 255;
            let in_dark = dark.get_pixel(x, 0)[0] == 255;
            if p[0] == 100 {
                assert!(in_light && in_dark);
            } else {
                assert!(in_light != in_dark);
            }
        }
    }
}
