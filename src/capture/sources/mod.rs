use std::process::{Child, Command};

use crate::capture::types::{CaptureError, ProcessStatus};

pub(crate) mod grim;
pub(crate) mod slurp;

pub use grim::GrimCapturer;
pub use slurp::SlurpSelector;

/// Spawn `command`, mapping launch failures to [`CaptureError::Spawn`].
fn spawn(program: &str, command: &mut Command) -> Result<Child, CaptureError> {
    log::debug!("Launching {:?}", command);
    command.spawn().map_err(|source| CaptureError::Spawn {
        program: program.to_string(),
        source,
    })
}

/// Block until `child` exits and classify how it ended.
fn wait(program: &str, child: &mut Child) -> Result<ProcessStatus, CaptureError> {
    let status = child
        .wait()
        .map(ProcessStatus::from)
        .map_err(|source| CaptureError::Wait {
            program: program.to_string(),
            source,
        })?;
    log::debug!("{} finished with {} (pid {})", program, status, child.id());
    Ok(status)
}
