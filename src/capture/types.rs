//! Data types for region capture.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{ExitCode, ExitStatus};

use nix::sys::signal::Signal;
use thiserror::Error;

/// Region descriptor produced by the selection tool (e.g. `"100,100 200x200"`).
///
/// The contents are tool-defined and never parsed; the text is handed to the
/// capture tool exactly as received, minus one trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry(String);

impl Geometry {
    /// Build a descriptor from raw selector output, stripping at most one
    /// trailing `\n`. Returns `None` when nothing but whitespace remains.
    pub fn from_selector_output(mut raw: String) -> Option<Self> {
        if raw.ends_with('\n') {
            raw.pop();
        }
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a child process that actually ran came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// Exited normally with the given code.
    Exited(i32),
    /// Terminated by the given signal number.
    Signaled(i32),
}

impl ProcessStatus {
    pub fn success(self) -> bool {
        self == Self::Exited(0)
    }
}

impl From<ExitStatus> for ProcessStatus {
    fn from(status: ExitStatus) -> Self {
        use std::os::unix::process::ExitStatusExt;

        match (status.code(), status.signal()) {
            (Some(code), _) => Self::Exited(code),
            (None, Some(signo)) => Self::Signaled(signo),
            // Stopped/continued states are never reported by `wait`.
            (None, None) => Self::Exited(-1),
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Exited(code) => write!(f, "exit code {code}"),
            Self::Signaled(signo) => match Signal::try_from(signo) {
                Ok(signal) => write!(f, "killed by {}", signal.as_str()),
                Err(_) => write!(f, "killed by signal {signo}"),
            },
        }
    }
}

/// Progress of a single capture run.
///
/// `Cancelled`, `Captured`, `CaptureFailed` and `Interrupted` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureStatus {
    Idle,
    ResolvingPaths,
    SelectingRegion,
    Capturing,
    Cancelled,
    Captured,
    CaptureFailed,
    Interrupted,
}

impl CaptureStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::Captured | Self::CaptureFailed | Self::Interrupted
        )
    }
}

/// Non-fatal result of a capture run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The capture tool reported success; the image is at this path.
    Captured(PathBuf),
    /// The user backed out of region selection.
    Cancelled(String),
    /// The capture tool ran but did not succeed.
    Failed(String),
    /// SIGINT/SIGTERM arrived before the capture tool was launched.
    Interrupted,
}

impl CaptureOutcome {
    /// Raw process status for this outcome. Only a failed capture is non-zero.
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Failed(_) => 1,
            Self::Captured(_) | Self::Cancelled(_) | Self::Interrupted => 0,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Errors that can occur while resolving paths or running the external tools.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Unable to get home directory: HOME is not set")]
    MissingHome,

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exists but is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Area selection cancelled: {0}")]
    Cancelled(String),

    #[error("Error executing {program}: {status}")]
    ToolFailed {
        program: String,
        status: ProcessStatus,
    },
}

impl CaptureError {
    /// Whether the error should abort the process rather than end the run normally.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Cancelled(_) | Self::ToolFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_exactly_one_trailing_newline() {
        let geometry = Geometry::from_selector_output("100,100 200x200\n".into()).unwrap();
        assert_eq!(geometry.as_str(), "100,100 200x200");

        let geometry = Geometry::from_selector_output("1,2 3x4\n\n".into()).unwrap();
        assert_eq!(geometry.as_str(), "1,2 3x4\n");
    }

    #[test]
    fn keeps_output_without_newline_verbatim() {
        let geometry = Geometry::from_selector_output(" 0,0 10x10 ".into()).unwrap();
        assert_eq!(geometry.to_string(), " 0,0 10x10 ");
    }

    #[test]
    fn empty_or_blank_output_is_not_a_geometry() {
        assert!(Geometry::from_selector_output(String::new()).is_none());
        assert!(Geometry::from_selector_output("\n".into()).is_none());
        assert!(Geometry::from_selector_output("  \t\n".into()).is_none());
    }

    #[test]
    fn process_status_display() {
        assert!(ProcessStatus::Exited(0).success());
        assert!(!ProcessStatus::Exited(2).success());
        assert!(!ProcessStatus::Signaled(9).success());
        assert_eq!(ProcessStatus::Exited(2).to_string(), "exit code 2");
        assert_eq!(ProcessStatus::Signaled(9).to_string(), "killed by SIGKILL");
    }

    #[test]
    fn only_capture_failure_changes_exit_code() {
        assert_eq!(CaptureOutcome::Failed("grim".into()).exit_status(), 1);
        assert_eq!(
            CaptureOutcome::Captured(PathBuf::from("/tmp/a.png")).exit_status(),
            0
        );
        assert_eq!(CaptureOutcome::Cancelled("slurp".into()).exit_status(), 0);
        assert_eq!(CaptureOutcome::Interrupted.exit_status(), 0);
    }

    #[test]
    fn fatal_classification() {
        assert!(CaptureError::MissingHome.is_fatal());
        assert!(!CaptureError::Cancelled("esc".into()).is_fatal());
        assert!(
            !CaptureError::ToolFailed {
                program: "grim".into(),
                status: ProcessStatus::Exited(1),
            }
            .is_fatal()
        );
    }
}
