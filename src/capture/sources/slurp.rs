use std::io::Read;
use std::process::{Command, Stdio};

use crate::capture::types::{CaptureError, Geometry};

/// Upper bound on how much selector output is read from the pipe.
pub const GEOMETRY_BUFFER_LIMIT: u64 = 256;

/// Interactive region selection through `slurp`.
///
/// `slurp` prints a single `"x,y wxh"` line on stdout when the user finishes
/// drawing and exits non-zero when the selection is aborted (Escape, right click).
#[derive(Debug, Clone)]
pub struct SlurpSelector {
    program: String,
    args: Vec<String>,
}

impl SlurpSelector {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Run a program with extra leading arguments (used to script the selector in tests).
    #[cfg(test)]
    pub(crate) fn with_args(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// Let the user draw a region and return its geometry.
    ///
    /// Backing out of the selection, or any output that is empty, blank or
    /// unreadable, yields [`CaptureError::Cancelled`]. Only failing to start or
    /// reap the process is a hard error.
    pub fn select_region(&self) -> Result<Geometry, CaptureError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        let mut child = super::spawn(&self.program, &mut command)?;

        // Read while the selector is still running; EOF arrives when it exits
        // (or closes stdout). The read end is dropped before waiting so an
        // oversized writer gets EPIPE instead of blocking forever.
        let raw = match child.stdout.take() {
            Some(stdout) => {
                let mut buf = Vec::with_capacity(GEOMETRY_BUFFER_LIMIT as usize);
                stdout
                    .take(GEOMETRY_BUFFER_LIMIT)
                    .read_to_end(&mut buf)
                    .map(|_| buf)
            }
            None => Err(std::io::Error::other("stdout pipe was not captured")),
        };

        let status = super::wait(&self.program, &mut child)?;
        if !status.success() {
            return Err(CaptureError::Cancelled(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        let raw = raw.map_err(|e| {
            log::warn!("Failed to read {} output: {}", self.program, e);
            CaptureError::Cancelled(format!("could not read {} output: {}", self.program, e))
        })?;
        let text = String::from_utf8(raw).map_err(|_| {
            CaptureError::Cancelled(format!("{} produced non-UTF-8 output", self.program))
        })?;

        let geometry = Geometry::from_selector_output(text).ok_or_else(|| {
            CaptureError::Cancelled(format!("{} returned an empty selection", self.program))
        })?;
        log::info!("Selected region: {}", geometry);
        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(script: &str) -> SlurpSelector {
        SlurpSelector::with_args("sh", &["-c", script])
    }

    #[test]
    fn returns_geometry_without_trailing_newline() {
        let geometry = scripted("printf '100,100 200x200\\n'")
            .select_region()
            .unwrap();
        assert_eq!(geometry.as_str(), "100,100 200x200");
    }

    #[test]
    fn nonzero_exit_is_cancellation() {
        let err = scripted("printf '1,1 5x5\\n'; exit 1")
            .select_region()
            .unwrap_err();
        match err {
            CaptureError::Cancelled(reason) => assert!(reason.contains("exit code 1"), "{reason}"),
            other => panic!("expected Cancelled, got {other:?}"),
        }
    }

    #[test]
    fn empty_output_is_cancellation() {
        let err = scripted("exit 0").select_region().unwrap_err();
        assert!(matches!(err, CaptureError::Cancelled(_)), "{err:?}");
        assert!(!err.is_fatal());
    }

    #[test]
    fn whitespace_output_is_cancellation() {
        let err = scripted("printf '   \\n'").select_region().unwrap_err();
        assert!(matches!(err, CaptureError::Cancelled(_)), "{err:?}");
    }

    #[test]
    fn killed_selector_is_cancellation() {
        let err = scripted("kill -9 $$").select_region().unwrap_err();
        match err {
            CaptureError::Cancelled(reason) => assert!(reason.contains("SIGKILL"), "{reason}"),
            other => panic!("expected Cancelled, got {other:?}"),
        }
    }

    #[test]
    fn output_is_bounded() {
        let geometry = scripted("printf '%0300d' 0").select_region().unwrap();
        assert_eq!(geometry.as_str().len(), GEOMETRY_BUFFER_LIMIT as usize);
    }

    #[test]
    fn missing_program_is_fatal() {
        let err = SlurpSelector::new("eagleshot-no-such-selector")
            .select_region()
            .unwrap_err();
        assert!(matches!(err, CaptureError::Spawn { .. }), "{err:?}");
        assert!(err.is_fatal());
    }
}
