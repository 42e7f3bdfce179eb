//! Region screenshot capture for eagleshot.
//!
//! A run resolves the output path, asks `slurp` for a region and hands that
//! region to `grim`. Both tools are external processes; nothing here touches
//! the compositor directly.

pub mod dependencies;
pub mod file;
pub mod pipeline;
pub mod sources;
pub mod types;


pub use dependencies::{CaptureDependencies, RegionCapturer, RegionSelector};
pub use file::OutputPath;
pub use pipeline::{CaptureSession, perform_capture};
pub use types::{CaptureError, CaptureOutcome, CaptureStatus, Geometry, ProcessStatus};
