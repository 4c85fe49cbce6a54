use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use platecount::{PlateAnalyzer, PlateParams, Preset};

#[derive(Parser)]
#[command(name = "platecount")]
#[command(about = "Count colonies, plaques or cells on a circular-plate photograph")]
struct Cli {
    /// Path to the plate photograph (JPEG or PNG)
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Counting mode supplying the parameter defaults
    #[arg(long, value_enum, default_value = "cfu")]
    preset: Preset,

    /// Radius of the circular detection region, in working-image pixels
    #[arg(long, value_name = "PIXELS")]
    roi_radius: Option<u32>,

    /// Brightness cutoff (0-255) separating objects from the plate
    #[arg(long, value_name = "LEVEL")]
    threshold: Option<u8>,

    /// Reject objects with enclosed area at or below this (pixels²)
    #[arg(long, value_name = "AREA")]
    min_area: Option<f64>,

    /// Reject objects with enclosed area at or above this (pixels²)
    #[arg(long, value_name = "AREA")]
    max_area: Option<f64>,

    /// Objects are brighter than the plate
    #[arg(long, conflicts_with = "dark_targets")]
    light_targets: bool,

    /// Objects are darker than the plate
    #[arg(long)]
    dark_targets: bool,

    /// Skip the adaptive contrast-enhancement pass
    #[arg(long)]
    no_enhance: bool,

    /// Save the annotated image here
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Save the thresholded binary view here
    #[arg(long, value_name = "FILE")]
    mask_out: Option<PathBuf>,

    /// Write every intermediate stage image to this directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn params(&self) -> PlateParams {
        let mut params = self.preset.params();
        if let Some(radius) = self.roi_radius {
            params.roi_radius = radius;
        }
        if let Some(threshold) = self.threshold {
            params.brightness_threshold = threshold;
        }
        if let Some(min_area) = self.min_area {
            params.min_area = min_area;
        }
        if let Some(max_area) = self.max_area {
            params.max_area = max_area;
        }
        if self.light_targets {
            params.target_is_light = true;
        }
        if self.dark_targets {
            params.target_is_light = false;
        }
        if self.no_enhance {
            params.enhance_contrast = false;
        }
        params
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "platecount=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let bytes = std::fs::read(&args.image_path)
        .with_context(|| format!("failed to read {}", args.image_path.display()))?;

    let mut analyzer = PlateAnalyzer::new(args.params())?;
    if let Some(dir) = args.debug_out.clone() {
        analyzer = analyzer.with_stage_dump(dir)?;
    }

    let analysis = analyzer
        .analyze_bytes(&bytes)
        .with_context(|| format!("analysis of {} failed", args.image_path.display()))?;

    if let Some(path) = &args.output {
        analysis
            .annotated
            .save(path)
            .with_context(|| format!("failed to save annotated image to {}", path.display()))?;
    }
    if let Some(path) = &args.mask_out {
        analysis
            .binary
            .save(path)
            .with_context(|| format!("failed to save binary view to {}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis.report())?);
    } else {
        println!("=== Plate Count Results ===");
        println!("Total objects counted: {}", analysis.count);
        if args.verbose && !analysis.blobs.is_empty() {
            println!("\nAccepted objects:");
            for (i, blob) in analysis.blobs.iter().enumerate() {
                println!(
                    "  Object {} at ({:.1}, {:.1}) - area: {:.1} px²",
                    i + 1,
                    blob.centroid.0,
                    blob.centroid.1,
                    blob.area
                );
            }
        }
    }

    Ok(())
}
