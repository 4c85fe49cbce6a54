use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;
use tracing::debug;

use crate::models::Blob;

/// Trace the outer boundaries of all top-level foreground regions.
///
/// Hole borders and contours nested inside other objects are dropped, so a
/// foreground region that fully encloses a hole still counts once.
pub fn external_contours(binary: &GrayImage) -> Vec<Vec<Point<i32>>> {
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| c.points)
        .collect()
}

/// Enclosed polygon area (shoelace formula) of a closed boundary, in pixels².
///
/// Like the usual contour-area convention this measures the outer polygon;
/// holes inside the region do not reduce it.
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0i64;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    (twice_area.abs() as f64) / 2.0
}

/// Mean of the boundary points.
pub fn centroid(points: &[Point<i32>]) -> (f32, f32) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0i64, 0i64), |(sx, sy), p| (sx + p.x as i64, sy + p.y as i64));
    (sx as f32 / n, sy as f32 / n)
}

/// Extract external contours and keep those whose enclosed area lies strictly
/// between `min_area` and `max_area`.
pub fn accepted_blobs(binary: &GrayImage, min_area: f64, max_area: f64) -> Vec<Blob> {
    let outer = external_contours(binary);
    let total = outer.len();

    let blobs: Vec<Blob> = outer
        .into_iter()
        .filter_map(|points| {
            let area = polygon_area(&points);
            if min_area < area && area < max_area {
                let centroid = centroid(&points);
                Some(Blob { points, area, centroid })
            } else {
                None
            }
        })
        .collect();

    debug!(total, accepted = blobs.len(), "filtered contours by area");
    blobs
}
