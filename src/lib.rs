//! Sinusoidal globe gores from equirectangular images.
//!
//! A source image is cut into equal-angle vertical strips, each strip is
//! bent along a sinusoidal projection (longitude scaled by the cosine of
//! latitude), and the strips are pasted back together side by side.

pub mod config;
pub mod export;
pub mod merge;
pub mod pipeline;
pub mod projection;
pub mod split;

pub use config::{ConfigError, GoreConfig};
pub use export::{ExportError, PngExportOptions};
pub use merge::{merge_gores, MergeError};
pub use pipeline::{GoreRun, GoreStage, Pipeline, PipelineError, StageId};
pub use projection::{project_gore, project_gores, RepairConfig};
pub use split::{split_into_gores, Gore, GoreLayout, SplitError};
