use std::path::Path;
use std::process::{Command, Stdio};

use crate::capture::types::{CaptureError, Geometry};

/// Region capture through `grim -g <geometry> <file>`.
#[derive(Debug, Clone)]
pub struct GrimCapturer {
    program: String,
    args: Vec<String>,
}

impl GrimCapturer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_args(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// Write the `geometry` region of the screen to `destination`.
    ///
    /// Arguments are passed as a vector, never through a shell. Success is
    /// judged by the exit status alone; the written file is not inspected.
    pub fn capture_region(
        &self,
        geometry: &Geometry,
        destination: &Path,
    ) -> Result<(), CaptureError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg("-g")
            .arg(geometry.as_str())
            .arg(destination)
            .stdin(Stdio::null());

        log::debug!(
            "Capturing region {} to {} via {}",
            geometry,
            destination.display(),
            self.program
        );
        let mut child = super::spawn(&self.program, &mut command)?;
        let status = super::wait(&self.program, &mut child)?;

        if status.success() {
            log::info!("Screenshot written to {}", destination.display());
            Ok(())
        } else {
            log::warn!("{} failed with {}", self.program, status);
            Err(CaptureError::ToolFailed {
                program: self.program.clone(),
                status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::types::ProcessStatus;
    use std::fs;
    use tempfile::TempDir;

    fn geometry(text: &str) -> Geometry {
        Geometry::from_selector_output(text.to_string()).unwrap()
    }

    #[test]
    fn passes_geometry_and_destination_as_discrete_args() {
        let temp = TempDir::new().unwrap();
        let args_file = temp.path().join("args");
        let destination = temp.path().join("shot.png");
        let script = format!(
            "printf '%s\\n' \"$@\" > '{}'; : > \"$3\"",
            args_file.display()
        );
        let capturer = GrimCapturer::with_args("sh", &["-c", &script, "grim"]);

        // Shell metacharacters must reach the tool untouched.
        let geometry = geometry("0,0 10x10; touch pwned $(id)");
        capturer.capture_region(&geometry, &destination).unwrap();

        let recorded = fs::read_to_string(&args_file).unwrap();
        let lines: Vec<&str> = recorded.lines().collect();
        assert_eq!(
            lines,
            vec![
                "-g",
                "0,0 10x10; touch pwned $(id)",
                destination.to_str().unwrap()
            ]
        );
        assert!(destination.exists());
        assert!(!temp.path().join("pwned").exists());
    }

    #[test]
    fn nonzero_exit_is_tool_failure() {
        let temp = TempDir::new().unwrap();
        let capturer = GrimCapturer::with_args("sh", &["-c", "exit 3", "grim"]);

        let err = capturer
            .capture_region(&geometry("1,1 2x2"), &temp.path().join("x.png"))
            .unwrap_err();
        match &err {
            CaptureError::ToolFailed { program, status } => {
                assert_eq!(program, "sh");
                assert_eq!(*status, ProcessStatus::Exited(3));
            }
            other => panic!("expected ToolFailed, got {other:?}"),
        }
        assert!(!err.is_fatal());
    }

    #[test]
    fn signal_termination_is_tool_failure() {
        let temp = TempDir::new().unwrap();
        let capturer = GrimCapturer::with_args("sh", &["-c", "kill -TERM $$", "grim"]);

        let err = capturer
            .capture_region(&geometry("1,1 2x2"), &temp.path().join("x.png"))
            .unwrap_err();
        assert!(
            matches!(
                err,
                CaptureError::ToolFailed {
                    status: ProcessStatus::Signaled(15),
                    ..
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn missing_program_is_fatal() {
        let temp = TempDir::new().unwrap();
        let err = GrimCapturer::new("eagleshot-no-such-grim")
            .capture_region(&geometry("1,1 2x2"), &temp.path().join("x.png"))
            .unwrap_err();
        assert!(matches!(err, CaptureError::Spawn { .. }), "{err:?}");
        assert!(err.is_fatal());
    }
}
