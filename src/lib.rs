pub mod analyzer;
pub mod error;
pub mod models;

pub use analyzer::PlateAnalyzer;
pub use error::AnalyzeError;
pub use models::{Blob, BlobSummary, CountReport, PlateAnalysis, PlateParams, Preset};
