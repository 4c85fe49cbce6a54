use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the plate analyzer.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// The input bytes could not be decoded as an image.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The detection parameters were rejected before any processing.
    #[error("invalid parameters: {0}")]
    Config(String),

    /// The stage-dump directory exists and already contains files.
    #[error("debug directory is not empty: {}", .0.display())]
    DebugDirNotEmpty(PathBuf),

    /// The stage-dump directory could not be created or inspected.
    #[error("debug directory {}: {source}", .path.display())]
    DebugDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An intermediate stage image could not be written.
    #[error("failed to write stage image {}: {source}", .path.display())]
    StageDump {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
