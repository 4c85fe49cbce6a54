mod common;

use common::{inverted, plate_image, ring_spots, test_params};
use platecount::{PlateAnalyzer, PlateParams};

const SIZE: u32 = 800;
const PLATE_RADIUS: i32 = 280;

fn spotted_plate() -> image::DynamicImage {
    let spots = ring_spots(SIZE, 150.0, 10, 5);
    plate_image(SIZE, PLATE_RADIUS, &spots, 255)
}

/// Identical inputs must produce identical results, contrast enhancement
/// included.
#[test]
fn analysis_is_deterministic() -> anyhow::Result<()> {
    let img = spotted_plate();
    let params = PlateParams {
        enhance_contrast: true,
        ..test_params()
    };

    let analyzer = PlateAnalyzer::new(params)?;
    let first = analyzer.analyze(&img)?;
    let second = analyzer.analyze(&img)?;

    assert_eq!(first.count, second.count);
    assert_eq!(first.annotated.as_raw(), second.annotated.as_raw());
    assert_eq!(first.binary.as_raw(), second.binary.as_raw());
    Ok(())
}

/// Raising the area floor can only lose objects, never gain them.
#[test]
fn raising_min_area_is_monotone() -> anyhow::Result<()> {
    let img = spotted_plate();
    let mut previous = usize::MAX;
    for min_area in [1.0, 10.0, 40.0, 200.0] {
        let params = PlateParams {
            min_area,
            ..test_params()
        };
        let count = PlateAnalyzer::new(params)?.analyze(&img)?.count;
        assert!(count <= previous, "count rose from {previous} to {count} at min_area {min_area}");
        previous = count;
    }
    Ok(())
}

/// Lowering the area ceiling can only lose objects, never gain them.
#[test]
fn lowering_max_area_is_monotone() -> anyhow::Result<()> {
    let img = spotted_plate();
    let mut previous = usize::MAX;
    for max_area in [3000.0, 100.0, 20.0, 11.0] {
        let params = PlateParams {
            min_area: 1.0,
            max_area,
            ..test_params()
        };
        let count = PlateAnalyzer::new(params)?.analyze(&img)?.count;
        assert!(count <= previous, "count rose from {previous} to {count} at max_area {max_area}");
        previous = count;
    }
    Ok(())
}

/// No accepted object's centroid may fall outside the ROI disk.
#[test]
fn accepted_centroids_stay_inside_the_roi() -> anyhow::Result<()> {
    let mut spots = ring_spots(SIZE, 150.0, 5, 5);
    spots.extend(ring_spots(SIZE, 250.0, 5, 5));
    let img = plate_image(SIZE, PLATE_RADIUS, &spots, 255);

    let params = PlateParams {
        roi_radius: 120,
        ..test_params()
    };
    let analysis = PlateAnalyzer::new(params)?.analyze(&img)?;
    assert!(analysis.count > 0);

    let (cx, cy) = (240.0f32, 240.0f32);
    for blob in &analysis.blobs {
        let dx = blob.centroid.0 - cx;
        let dy = blob.centroid.1 - cy;
        let distance = (dx * dx + dy * dy).sqrt();
        assert!(
            distance <= 120.0 + 1.5,
            "centroid ({}, {}) lies {distance:.1} px from center",
            blob.centroid.0,
            blob.centroid.1
        );
    }
    Ok(())
}

/// Flipping the polarity flag on a tonally inverted frame finds the same
/// objects.
#[test]
fn polarity_is_symmetric_under_tonal_inversion() -> anyhow::Result<()> {
    let img = spotted_plate();

    // ROI large enough to cover the whole working frame, so the mask edge
    // cannot introduce spurious foreground in the dark-polarity run.
    let light_params = PlateParams {
        roi_radius: 340,
        ..test_params()
    };
    let light = PlateAnalyzer::new(light_params)?.analyze(&img)?;

    let dark_params = PlateParams {
        roi_radius: 340,
        brightness_threshold: 127,
        target_is_light: false,
        ..test_params()
    };
    let dark = PlateAnalyzer::new(dark_params)?.analyze(&inverted(&img))?;

    assert_eq!(light.count, 10);
    assert_eq!(dark.count, light.count);
    Ok(())
}
