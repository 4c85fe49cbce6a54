pub mod contours;
pub mod mask;
pub mod preprocessing;
pub mod render;
pub mod threshold;

use std::path::PathBuf;

use image::{DynamicImage, GrayImage, RgbImage};
use tracing::debug;

use crate::error::AnalyzeError;
use crate::models::{PlateAnalysis, PlateParams};

/// Plate photograph counter: a pure transform from (image, parameters) to
/// (count, annotated image, binary view).
///
/// Each call allocates its own working buffers, so a single analyzer can be
/// shared freely across threads or rebuilt per request.
pub struct PlateAnalyzer {
    params: PlateParams,
    dump: Option<StageDump>,
}

impl PlateAnalyzer {
    /// Validate the parameters and build an analyzer.
    pub fn new(params: PlateParams) -> Result<Self, AnalyzeError> {
        params.validate()?;
        Ok(Self { params, dump: None })
    }

    pub fn params(&self) -> &PlateParams {
        &self.params
    }

    /// Write every intermediate stage image to `dir` as numbered PNGs.
    /// The directory must be empty or absent.
    pub fn with_stage_dump(mut self, dir: PathBuf) -> Result<Self, AnalyzeError> {
        self.dump = Some(StageDump::new(dir)?);
        Ok(self)
    }

    /// Decode raw JPEG/PNG bytes and analyze the result. Undecodable input
    /// aborts with `AnalyzeError::Decode` and no partial result.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<PlateAnalysis, AnalyzeError> {
        let img = image::load_from_memory(bytes)?;
        self.analyze(&img)
    }

    /// Run the full pipeline on a decoded image.
    pub fn analyze(&self, input: &DynamicImage) -> Result<PlateAnalysis, AnalyzeError> {
        let params = &self.params;

        // 1. Downscale once to bound processing cost.
        let working = preprocessing::downscale(input, preprocessing::DOWNSCALE_FACTOR);
        let color = working.to_rgb8();
        let (width, height) = (color.width(), color.height());
        debug!(
            input_width = input.width(),
            input_height = input.height(),
            width,
            height,
            "downscaled input"
        );
        self.dump_rgb("00_input", &color)?;

        // 2. Grayscale, optionally contrast-normalized.
        let mut gray = preprocessing::to_grayscale(&working);
        self.dump_gray("01_grayscale", &gray)?;
        if params.enhance_contrast {
            gray = preprocessing::clahe(
                &gray,
                preprocessing::CLAHE_GRID,
                preprocessing::CLAHE_CLIP_LIMIT,
            );
            debug!("applied contrast-limited equalization");
            self.dump_gray("02_clahe", &gray)?;
        }

        // 3. Mask to the plate disk, removing rim reflections.
        let roi = mask::disk_mask(width, height, params.roi_radius);
        self.dump_gray("03_roi_mask", &roi)?;
        mask::apply(&mut gray, &roi);
        self.dump_gray("04_masked", &gray)?;

        // 4. Smooth, then binarize with the configured polarity.
        let blurred = preprocessing::blur(&gray, preprocessing::BLUR_SIGMA);
        self.dump_gray("05_blurred", &blurred)?;
        let mut binary = threshold::binarize(
            &blurred,
            params.brightness_threshold,
            params.target_is_light,
        );
        // Re-mask: the hard mask edge must not read as a foreground arc.
        mask::apply(&mut binary, &roi);
        self.dump_gray("06_binary", &binary)?;

        // 5. Count the external contours that pass the area filter.
        let blobs = contours::accepted_blobs(&binary, params.min_area, params.max_area);
        debug!(count = blobs.len(), "analysis complete");

        let annotated = render::annotate(
            &color,
            mask::center(width, height),
            params.roi_radius as i32,
            &blobs,
        );
        self.dump_rgb("07_annotated", &annotated)?;

        Ok(PlateAnalysis {
            count: blobs.len(),
            annotated,
            binary,
            blobs,
        })
    }

    fn dump_gray(&self, stage: &str, img: &GrayImage) -> Result<(), AnalyzeError> {
        match &self.dump {
            Some(dump) => dump.save(stage, |path| img.save(path)),
            None => Ok(()),
        }
    }

    fn dump_rgb(&self, stage: &str, img: &RgbImage) -> Result<(), AnalyzeError> {
        match &self.dump {
            Some(dump) => dump.save(stage, |path| img.save(path)),
            None => Ok(()),
        }
    }
}

/// Writes intermediate stage images for operator diagnostics.
struct StageDump {
    dir: PathBuf,
}

impl StageDump {
    fn new(dir: PathBuf) -> Result<Self, AnalyzeError> {
        if dir.exists() {
            let mut entries = std::fs::read_dir(&dir).map_err(|source| {
                AnalyzeError::DebugDir { path: dir.clone(), source }
            })?;
            if entries.next().is_some() {
                return Err(AnalyzeError::DebugDirNotEmpty(dir));
            }
        } else {
            std::fs::create_dir_all(&dir).map_err(|source| {
                AnalyzeError::DebugDir { path: dir.clone(), source }
            })?;
        }
        Ok(Self { dir })
    }

    fn save(
        &self,
        stage: &str,
        write: impl FnOnce(&std::path::Path) -> image::ImageResult<()>,
    ) -> Result<(), AnalyzeError> {
        let path = self.dir.join(format!("{stage}.png"));
        write(&path).map_err(|source| AnalyzeError::StageDump { path: path.clone(), source })?;
        debug!(path = %path.display(), "wrote stage image");
        Ok(())
    }
}
