use crate::capture::{
    dependencies::CaptureDependencies,
    file::{self, OutputPath},
    types::{CaptureError, CaptureOutcome, CaptureStatus, Geometry},
};
use crate::config::Config;
use crate::interrupt::Interrupt;

/// Tracks where a single run is in `Idle -> ResolvingPaths -> SelectingRegion
/// -> Capturing` and which terminal state it ended in.
#[derive(Debug)]
pub struct CaptureSession {
    status: CaptureStatus,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        Self {
            status: CaptureStatus::Idle,
        }
    }

    pub fn status(&self) -> &CaptureStatus {
        &self.status
    }

    fn advance(&mut self, next: CaptureStatus) {
        debug_assert!(
            !self.status.is_terminal(),
            "transition out of terminal state {:?}",
            self.status
        );
        log::debug!("Capture status: {:?} -> {:?}", self.status, next);
        self.status = next;
    }

    /// Run the whole flow once.
    ///
    /// The interrupt token is polled before the selector starts and again
    /// before the capture tool starts; a child that is already running is
    /// left to finish on its own.
    pub fn run(
        &mut self,
        config: &Config,
        dependencies: &CaptureDependencies,
        interrupt: &Interrupt,
    ) -> Result<CaptureOutcome, CaptureError> {
        self.advance(CaptureStatus::ResolvingPaths);
        let output = file::resolve_output_path(config)?;

        if let Some(outcome) = self.check_interrupt(interrupt) {
            return Ok(outcome);
        }

        self.advance(CaptureStatus::SelectingRegion);
        let geometry = match dependencies.selector.select_region() {
            Ok(geometry) => geometry,
            Err(CaptureError::Cancelled(reason)) => {
                log::info!("Capture cancelled: {}", reason);
                self.advance(CaptureStatus::Cancelled);
                return Ok(CaptureOutcome::Cancelled(reason));
            }
            Err(err) => return Err(err),
        };

        if let Some(outcome) = self.check_interrupt(interrupt) {
            return Ok(outcome);
        }

        self.advance(CaptureStatus::Capturing);
        self.capture(dependencies, &geometry, &output)
    }

    fn capture(
        &mut self,
        dependencies: &CaptureDependencies,
        geometry: &Geometry,
        output: &OutputPath,
    ) -> Result<CaptureOutcome, CaptureError> {
        let destination = output.full_path();
        match dependencies.capturer.capture_region(geometry, &destination) {
            Ok(()) => {
                self.advance(CaptureStatus::Captured);
                Ok(CaptureOutcome::Captured(destination))
            }
            Err(err @ CaptureError::ToolFailed { .. }) => {
                log::error!("Capture failed: {}", err);
                self.advance(CaptureStatus::CaptureFailed);
                Ok(CaptureOutcome::Failed(err.to_string()))
            }
            Err(err) => Err(err),
        }
    }

    fn check_interrupt(&mut self, interrupt: &Interrupt) -> Option<CaptureOutcome> {
        if interrupt.is_raised() {
            log::info!("Interrupted during {:?}; skipping capture", self.status);
            self.advance(CaptureStatus::Interrupted);
            Some(CaptureOutcome::Interrupted)
        } else {
            None
        }
    }
}

/// Resolve paths, select a region and capture it.
///
/// Expected endings (cancelled, tool failure, interrupted) are `Ok`; only
/// fatal errors are returned as `Err`.
pub fn perform_capture(
    config: &Config,
    dependencies: &CaptureDependencies,
    interrupt: &Interrupt,
) -> Result<CaptureOutcome, CaptureError> {
    CaptureSession::new().run(config, dependencies, interrupt)
}
