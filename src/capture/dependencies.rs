use std::path::Path;

use crate::capture::{
    sources::{GrimCapturer, SlurpSelector},
    types::{CaptureError, Geometry},
};
use crate::config::Config;

/// Abstraction over interactive region selection.
pub trait RegionSelector {
    fn select_region(&self) -> Result<Geometry, CaptureError>;
}

/// Abstraction over writing a screen region to an image file.
pub trait RegionCapturer {
    fn capture_region(&self, geometry: &Geometry, destination: &Path) -> Result<(), CaptureError>;
}

/// Bundle of external tools used by the capture pipeline. Each one can be mocked in tests.
pub struct CaptureDependencies {
    pub selector: Box<dyn RegionSelector>,
    pub capturer: Box<dyn RegionCapturer>,
}

impl CaptureDependencies {
    /// Wire the configured selector and capture programs.
    pub fn from_config(config: &Config) -> Self {
        Self {
            selector: Box::new(SlurpSelector::new(config.selector_program.clone())),
            capturer: Box::new(GrimCapturer::new(config.capture_program.clone())),
        }
    }
}

impl RegionSelector for SlurpSelector {
    fn select_region(&self) -> Result<Geometry, CaptureError> {
        SlurpSelector::select_region(self)
    }
}

impl RegionCapturer for GrimCapturer {
    fn capture_region(&self, geometry: &Geometry, destination: &Path) -> Result<(), CaptureError> {
        GrimCapturer::capture_region(self, geometry, destination)
    }
}
