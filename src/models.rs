use clap::ValueEnum;
use image::{GrayImage, RgbImage};
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

use crate::error::AnalyzeError;

/// Detection parameters for a single analysis.
///
/// `roi_radius` is expressed in working-image pixels, i.e. after the fixed
/// downscale step, matching how the plate region is selected interactively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateParams {
    /// Radius of the circular region of interest, in pixels.
    pub roi_radius: u32,
    /// Binarization cutoff applied to the smoothed grayscale image.
    pub brightness_threshold: u8,
    /// Contours with enclosed area at or below this are rejected as noise.
    pub min_area: f64,
    /// Contours with enclosed area at or above this are rejected as merged
    /// blobs or artifacts.
    pub max_area: f64,
    /// True when objects are brighter than the plate (e.g. colonies on dark
    /// agar); false for dark objects on a light plate (e.g. plaques).
    pub target_is_light: bool,
    /// Apply tile-based, clip-limited histogram equalization before
    /// thresholding to compensate for uneven illumination.
    pub enhance_contrast: bool,
}

impl Default for PlateParams {
    fn default() -> Self {
        Preset::Cfu.params()
    }
}

impl PlateParams {
    pub fn validate(&self) -> Result<(), AnalyzeError> {
        if self.roi_radius == 0 {
            return Err(AnalyzeError::Config("roi_radius must be positive".into()));
        }
        if self.min_area <= 0.0 {
            return Err(AnalyzeError::Config("min_area must be positive".into()));
        }
        if self.min_area >= self.max_area {
            return Err(AnalyzeError::Config(format!(
                "min_area ({}) must be less than max_area ({})",
                self.min_area, self.max_area
            )));
        }
        Ok(())
    }
}

/// Parameter bundles for the common counting modes.
///
/// These are starting points, not separate code paths: every field can still
/// be overridden per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Preset {
    /// Bacterial colonies: light objects, larger minimum size.
    Cfu,
    /// Phage plaques: dark objects on a lighter lawn.
    Pfu,
    /// Individual cells: dark objects, small minimum size.
    Cell,
}

impl Preset {
    pub fn params(self) -> PlateParams {
        let (target_is_light, min_area) = match self {
            Preset::Cfu => (true, 10.0),
            Preset::Pfu => (false, 5.0),
            Preset::Cell => (false, 2.0),
        };
        PlateParams {
            roi_radius: 280,
            brightness_threshold: 140,
            min_area,
            max_area: 3000.0,
            target_is_light,
            enhance_contrast: true,
        }
    }
}

/// A detected object: the traced outer boundary of one foreground region.
#[derive(Debug, Clone)]
pub struct Blob {
    /// Boundary polyline, closed implicitly (last point connects to first).
    pub points: Vec<Point<i32>>,
    /// Enclosed polygon area in pixels².
    pub area: f64,
    /// Mean of the boundary points.
    pub centroid: (f32, f32),
}

/// Outcome of one analysis call.
pub struct PlateAnalysis {
    /// Number of accepted objects.
    pub count: usize,
    /// Resized color image with the ROI circle and accepted contour
    /// outlines drawn on it.
    pub annotated: RgbImage,
    /// The thresholded mask, for operator diagnostics.
    pub binary: GrayImage,
    /// The accepted objects, in detection order.
    pub blobs: Vec<Blob>,
}

impl PlateAnalysis {
    /// Serializable summary for the `--json` report.
    pub fn report(&self) -> CountReport {
        CountReport {
            count: self.count,
            image_width: self.annotated.width(),
            image_height: self.annotated.height(),
            blobs: self
                .blobs
                .iter()
                .map(|b| BlobSummary {
                    area: b.area,
                    centroid: [b.centroid.0, b.centroid.1],
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CountReport {
    pub count: usize,
    pub image_width: u32,
    pub image_height: u32,
    pub blobs: Vec<BlobSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlobSummary {
    pub area: f64,
    pub centroid: [f32; 2],
}
