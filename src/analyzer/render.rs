use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};

use crate::models::Blob;

const ROI_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const BLOB_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Copy the working color image and draw the ROI boundary circle plus an
/// outline for every accepted object.
pub fn annotate(base: &RgbImage, center: (i32, i32), roi_radius: i32, blobs: &[Blob]) -> RgbImage {
    let mut canvas = base.clone();

    // Two concentric passes give the ROI circle a 2 px stroke.
    draw_hollow_circle_mut(&mut canvas, center, roi_radius, ROI_COLOR);
    if roi_radius > 1 {
        draw_hollow_circle_mut(&mut canvas, center, roi_radius - 1, ROI_COLOR);
    }

    for blob in blobs {
        outline(&mut canvas, blob);
    }
    canvas
}

fn outline(canvas: &mut RgbImage, blob: &Blob) {
    let points = &blob.points;
    if points.len() == 1 {
        let p = points[0];
        if p.x >= 0 && p.y >= 0 && (p.x as u32) < canvas.width() && (p.y as u32) < canvas.height() {
            canvas.put_pixel(p.x as u32, p.y as u32, BLOB_COLOR);
        }
        return;
    }
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        draw_line_segment_mut(
            canvas,
            (p.x as f32, p.y as f32),
            (q.x as f32, q.y as f32),
            BLOB_COLOR,
        );
    }
}
